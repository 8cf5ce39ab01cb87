pub mod domain;
pub mod error;
pub mod list;
pub mod protocol;
pub mod reorder;

pub use domain::{EditOutcome, MoveDirection, RowId, ScenePath, SceneRecord, SCENE_EXTENSION};
pub use error::{ErrorCode, Notice, SceneListError};
pub use list::SceneList;
