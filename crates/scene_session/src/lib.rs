//! Editing session and panel controller for a project's scene build list.

pub mod error;
pub mod host;
pub mod panel;
pub mod play;
pub mod session;
pub mod view;

pub use error::{SessionError, SessionResult};
pub use host::{
    project_relative_scene, Dialogs, FilePicker, OpenMode, PlayMode, PlayModeChange, PlayState,
    SceneOpener,
};
pub use panel::ScenePanel;
pub use play::{PlayFirstOutcome, RestorationList};
pub use session::{EditSession, SaveMode};
pub use view::{SceneRow, SceneView, ROOT_LABEL};
