use scene_model::{Notice, SceneListError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    List(#[from] SceneListError),
    #[error(transparent)]
    Store(#[from] anyhow::Error),
}

impl SessionError {
    /// The rejection behind this error, when it came from the list itself.
    pub fn list_error(&self) -> Option<&SceneListError> {
        match self {
            Self::List(err) => Some(err),
            Self::Store(_) => None,
        }
    }

    pub fn is_benign(&self) -> bool {
        self.list_error().is_some_and(SceneListError::is_benign)
    }
}

impl From<&SessionError> for Notice {
    fn from(value: &SessionError) -> Self {
        match value {
            SessionError::List(err) => Notice::from(err),
            SessionError::Store(_) => Notice::new(
                scene_model::ErrorCode::StoreFailure,
                "Build Settings",
                value.to_string(),
            ),
        }
    }
}

pub type SessionResult<T> = Result<T, SessionError>;
