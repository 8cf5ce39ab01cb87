use std::fmt;

use serde::{Deserialize, Serialize};

/// File extension carried by every loadable scene asset.
pub const SCENE_EXTENSION: &str = ".unity";

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub struct $name(pub i64);
    };
}

id_newtype!(RowId);

impl RowId {
    /// The invisible root row every scene row hangs off.
    pub const ROOT: RowId = RowId(0);

    pub fn is_root(self) -> bool {
        self == Self::ROOT
    }
}

/// Project-relative path of a scene asset. Unique key of a [`SceneRecord`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScenePath(String);

impl ScenePath {
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Last path segment without the scene extension, e.g. `Assets/Levels/Intro.unity` -> `Intro`.
    pub fn display_name(&self) -> &str {
        let file = self.0.rsplit('/').next().unwrap_or_default();
        file.strip_suffix(SCENE_EXTENSION).unwrap_or(file)
    }

    pub fn is_scene_asset(&self) -> bool {
        !self.0.is_empty() && self.0.ends_with(SCENE_EXTENSION)
    }
}

impl fmt::Display for ScenePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ScenePath {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for ScenePath {
    fn from(value: String) -> Self {
        Self(value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SceneRecord {
    pub path: ScenePath,
    pub enabled: bool,
}

impl SceneRecord {
    pub fn new(path: impl Into<ScenePath>, enabled: bool) -> Self {
        Self {
            path: path.into(),
            enabled,
        }
    }

    pub fn enabled(path: impl Into<ScenePath>) -> Self {
        Self::new(path, true)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MoveDirection {
    Up,
    Down,
}

impl MoveDirection {
    pub fn delta(self) -> isize {
        match self {
            Self::Up => -1,
            Self::Down => 1,
        }
    }
}

/// Result of a mutation that may legitimately change nothing
/// (a move at the boundary, removing an absent path, an empty selection).
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditOutcome {
    Applied,
    Unchanged,
}

impl EditOutcome {
    pub fn is_applied(self) -> bool {
        self == Self::Applied
    }

    pub(crate) fn from_changed(changed: bool) -> Self {
        if changed {
            Self::Applied
        } else {
            Self::Unchanged
        }
    }
}
