//! Seams to the editor that hosts the panel: scene opening, play mode, file
//! picking and dialogs. The panel never reaches editor state any other way.

use std::path::{Component, Path, PathBuf};

use scene_model::{Notice, SceneListError, ScenePath};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenMode {
    /// Close everything else and open this scene alone.
    Single,
    /// Open alongside the scenes already loaded.
    Additive,
}

pub trait SceneOpener {
    /// Offers to save modified open scenes. `false` means the user cancelled.
    fn save_modified_if_user_wants(&mut self) -> bool;
    fn open(&mut self, path: &ScenePath, mode: OpenMode) -> anyhow::Result<()>;
    fn open_scenes(&self) -> Vec<ScenePath>;
    fn active_scene(&self) -> Option<ScenePath>;
    fn set_active(&mut self, path: &ScenePath) -> anyhow::Result<()>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayState {
    Editing,
    Playing,
    Paused,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayModeChange {
    ExitingEditMode,
    EnteredPlayMode,
    ExitingPlayMode,
    EnteredEditMode,
}

pub trait PlayMode {
    fn state(&self) -> PlayState;
    fn start(&mut self);
    fn stop(&mut self);
    fn pause(&mut self);
    fn resume(&mut self);
}

pub trait FilePicker {
    /// `None` when the user cancelled.
    fn pick_scene(&mut self, project_root: &Path) -> Option<PathBuf>;
}

pub trait Dialogs {
    fn confirm(&mut self, title: &str, message: &str, ok: &str, cancel: &str) -> bool;
    fn notify(&mut self, notice: &Notice);
}

/// Turns a picked file into the project-relative key used in build settings.
/// Absolute paths must sit under `project_root`; relative ones are taken as
/// already project-relative. Either way the result has to be a scene asset
/// and may not climb out of the project.
pub fn project_relative_scene(project_root: &Path, picked: &Path) -> Result<ScenePath, SceneListError> {
    let invalid = || SceneListError::InvalidPath(picked.display().to_string());

    let relative = if picked.is_absolute() {
        picked.strip_prefix(project_root).map_err(|_| invalid())?
    } else {
        picked
    };

    let mut segments = Vec::new();
    for component in relative.components() {
        match component {
            Component::Normal(segment) => segments.push(segment.to_str().ok_or_else(invalid)?),
            Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => return Err(invalid()),
        }
    }

    let path = ScenePath::new(segments.join("/"));
    if !path.is_scene_asset() {
        return Err(invalid());
    }
    Ok(path)
}
