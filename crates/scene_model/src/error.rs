use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::ScenePath;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    DuplicateKey,
    EmptySelection,
    InvalidPath,
    NotFound,
    NestedDropTarget,
    StoreFailure,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SceneListError {
    #[error("scene '{0}' is already in the build list")]
    DuplicateKey(ScenePath),
    #[error("no scene selected")]
    EmptySelection,
    #[error("'{0}' is not a scene inside the project")]
    InvalidPath(String),
    #[error("scenes can only be dropped between top-level rows")]
    NestedDropTarget,
}

impl SceneListError {
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::DuplicateKey(_) => ErrorCode::DuplicateKey,
            Self::EmptySelection => ErrorCode::EmptySelection,
            Self::InvalidPath(_) => ErrorCode::InvalidPath,
            Self::NestedDropTarget => ErrorCode::NestedDropTarget,
        }
    }

    /// Rejections that need no user notice. Moves past the edge and edits of
    /// absent paths are not errors at all; they come back as
    /// `EditOutcome::Unchanged`.
    pub fn is_benign(&self) -> bool {
        matches!(self, Self::EmptySelection)
    }
}

/// User-facing rendering of a rejected action: a dialog title plus its text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub code: ErrorCode,
    pub title: String,
    pub message: String,
}

impl Notice {
    pub fn new(code: ErrorCode, title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code,
            title: title.into(),
            message: message.into(),
        }
    }
}

impl From<&SceneListError> for Notice {
    fn from(value: &SceneListError) -> Self {
        let title = match value {
            SceneListError::DuplicateKey(_) => "Add Scene",
            SceneListError::InvalidPath(_) => "Invalid Scene",
            SceneListError::NestedDropTarget => "Move Scenes",
            SceneListError::EmptySelection => "Remove Scenes",
        };
        Self::new(value.code(), title, value.to_string())
    }
}

impl From<SceneListError> for Notice {
    fn from(value: SceneListError) -> Self {
        Self::from(&value)
    }
}
