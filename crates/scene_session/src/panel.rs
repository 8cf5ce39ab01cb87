use std::path::{Path, PathBuf};

use scene_model::{
    protocol::{DragData, DragPayload, DropTarget, DropVisual},
    EditOutcome, ErrorCode, MoveDirection, Notice, RowId, SceneListError, ScenePath,
};
use scene_store::BuildSettingsStore;
use tracing::{debug, info, warn};

use crate::{
    error::{SessionError, SessionResult},
    host::{
        project_relative_scene, Dialogs, FilePicker, OpenMode, PlayMode, PlayModeChange,
        PlayState, SceneOpener,
    },
    play::{PlayFirstOutcome, RestorationList},
    session::{EditSession, SaveMode},
    view::{SceneRow, SceneView},
};

/// Controller behind the scene list window: turns row-level UI events into
/// session edits and keeps the rows in step with the list.
pub struct ScenePanel<S> {
    session: EditSession<S>,
    view: SceneView,
    selection: Vec<ScenePath>,
    project_root: PathBuf,
    restoration: Option<RestorationList>,
}

impl<S: BuildSettingsStore> ScenePanel<S> {
    pub fn new(session: EditSession<S>, project_root: impl Into<PathBuf>) -> Self {
        let view = SceneView::build(session.scenes());
        Self {
            session,
            view,
            selection: Vec::new(),
            project_root: project_root.into(),
            restoration: None,
        }
    }

    pub fn open(store: S, mode: SaveMode, project_root: impl Into<PathBuf>) -> SessionResult<Self> {
        Ok(Self::new(EditSession::open(store, mode)?, project_root))
    }

    pub fn session(&self) -> &EditSession<S> {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut EditSession<S> {
        &mut self.session
    }

    pub fn rows(&self) -> &[SceneRow] {
        self.view.rows()
    }

    pub fn view(&self) -> &SceneView {
        &self.view
    }

    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    pub fn is_dirty(&self) -> bool {
        self.session.is_dirty()
    }

    pub fn restoration(&self) -> Option<&RestorationList> {
        self.restoration.as_ref()
    }

    /// Called once per repaint. Returns `true` when the host array changed
    /// size behind the panel and the list was reloaded from it.
    pub fn refresh(&mut self) -> SessionResult<bool> {
        let reloaded = self.session.sync_with_store()?;
        if reloaded {
            self.rebuild();
        }
        Ok(reloaded)
    }

    pub fn select(&mut self, rows: &[RowId]) {
        self.selection = self.view.paths_for(rows);
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    /// Selected rows in list order. Selection follows scenes across moves.
    pub fn selected_rows(&self) -> Vec<RowId> {
        self.view
            .rows()
            .iter()
            .filter(|row| self.selection.contains(&row.path))
            .map(|row| row.id)
            .collect()
    }

    pub fn selected_paths(&self) -> &[ScenePath] {
        &self.selection
    }

    /// Opens the scene behind `row` on its own, after offering to save.
    /// Returns `false` when the row is unknown or the user cancelled.
    pub fn double_click(&mut self, row: RowId, opener: &mut dyn SceneOpener) -> anyhow::Result<bool> {
        let Some(path) = self.view.path_for(row).cloned() else {
            return Ok(false);
        };
        if !opener.save_modified_if_user_wants() {
            debug!(path = %path, "open cancelled at save prompt");
            return Ok(false);
        }
        opener.open(&path, OpenMode::Single)?;
        info!(path = %path, "scene opened");
        Ok(true)
    }

    pub fn move_row(&mut self, row: RowId, direction: MoveDirection) -> SessionResult<EditOutcome> {
        let Some(path) = self.view.path_for(row).cloned() else {
            return Ok(EditOutcome::Unchanged);
        };
        let outcome = self.session.move_single(&path, direction.delta())?;
        self.after_edit(outcome);
        Ok(outcome)
    }

    pub fn move_selected(&mut self, direction: MoveDirection) -> SessionResult<EditOutcome> {
        if self.selection.is_empty() {
            return Ok(EditOutcome::Unchanged);
        }
        let outcome = self
            .session
            .move_selection_block(&self.selection, direction)?;
        self.after_edit(outcome);
        Ok(outcome)
    }

    pub fn toggle_row(&mut self, row: RowId) -> SessionResult<EditOutcome> {
        let Some(path) = self.view.path_for(row).cloned() else {
            return Ok(EditOutcome::Unchanged);
        };
        let outcome = self.session.toggle_enabled(&path)?;
        self.after_edit(outcome);
        Ok(outcome)
    }

    /// Per-row remove button.
    pub fn remove_row(&mut self, row: RowId, dialogs: &mut dyn Dialogs) -> SessionResult<EditOutcome> {
        let Some(path) = self.view.path_for(row).cloned() else {
            dialogs.notify(&Notice::new(
                ErrorCode::NotFound,
                "Remove Scene",
                "Could not find the selected scene.",
            ));
            return Ok(EditOutcome::Unchanged);
        };

        let message = format!("Remove scene '{path}' from Build Settings?");
        if !dialogs.confirm("Confirm Remove", &message, "Remove", "Cancel") {
            return Ok(EditOutcome::Unchanged);
        }

        let outcome = report(dialogs, self.session.remove(&path))?;
        self.after_edit(outcome);
        Ok(outcome)
    }

    pub fn remove_selected(&mut self, dialogs: &mut dyn Dialogs) -> SessionResult<EditOutcome> {
        if self.selection.is_empty() {
            dialogs.notify(&Notice::new(
                ErrorCode::EmptySelection,
                "Remove Scenes",
                "No scene selected to remove.",
            ));
            return Err(SceneListError::EmptySelection.into());
        }

        let to_remove = self.selection.clone();
        let message = match to_remove.as_slice() {
            [only] => format!("Remove scene '{only}' from Build Settings?"),
            many => format!("Remove {} selected scenes from Build Settings?", many.len()),
        };
        if !dialogs.confirm("Confirm Remove", &message, "Remove", "Cancel") {
            return Ok(EditOutcome::Unchanged);
        }

        let outcome = report(dialogs, self.session.remove_many(&to_remove))?;
        self.after_edit(outcome);
        Ok(outcome)
    }

    pub fn can_start_drag(&self, rows: &[RowId]) -> bool {
        !rows.is_empty()
    }

    pub fn begin_drag(&self, rows: &[RowId]) -> Option<DragPayload> {
        let paths = self.view.paths_for(rows);
        if paths.is_empty() {
            return None;
        }
        debug!(scenes = paths.len(), "drag started");
        Some(DragPayload::new(paths))
    }

    /// Hover and drop share one path: the returned visual tells the host
    /// whether a drop here is accepted, and `perform` commits it. Performing
    /// a drop onto a nested row is rejected with `NestedDropTarget`.
    pub fn handle_drop(
        &mut self,
        data: &DragData,
        target: DropTarget,
        perform: bool,
    ) -> SessionResult<DropVisual> {
        let dropped = data.dropped_paths();
        if dropped.is_empty() {
            return Ok(DropVisual::None);
        }
        if !target.is_top_level() {
            if perform {
                return Err(SceneListError::NestedDropTarget.into());
            }
            return Ok(DropVisual::None);
        }

        if perform {
            let outcome = self.session.drop_paths(&dropped, target.insert_at)?;
            self.after_edit(outcome);
        }
        Ok(DropVisual::Move)
    }

    /// Adds the scene chosen in the host's file picker. Cancelling the picker
    /// changes nothing.
    pub fn add_via_picker(
        &mut self,
        picker: &mut dyn FilePicker,
        dialogs: &mut dyn Dialogs,
    ) -> SessionResult<EditOutcome> {
        let Some(picked) = picker.pick_scene(&self.project_root) else {
            return Ok(EditOutcome::Unchanged);
        };
        report(dialogs, self.add_path(&picked))?;
        Ok(EditOutcome::Applied)
    }

    pub fn add_path(&mut self, picked: &Path) -> SessionResult<ScenePath> {
        let path = project_relative_scene(&self.project_root, picked)?;
        self.session.add(path.clone())?;
        self.after_edit(EditOutcome::Applied);
        Ok(path)
    }

    pub fn save(&mut self) -> SessionResult<()> {
        self.session.save()
    }

    pub fn discard(&mut self) -> SessionResult<()> {
        self.session.discard()?;
        self.rebuild();
        Ok(())
    }

    /// Opens the first enabled scene on its own and enters play mode. The
    /// scenes open beforehand are reopened on the next return to edit mode.
    pub fn play_first(
        &mut self,
        opener: &mut dyn SceneOpener,
        play: &mut dyn PlayMode,
        dialogs: &mut dyn Dialogs,
    ) -> anyhow::Result<PlayFirstOutcome> {
        if play.state() != PlayState::Editing {
            return Ok(PlayFirstOutcome::AlreadyPlaying);
        }

        let Some(first) = self
            .session
            .scenes()
            .first_enabled()
            .map(|record| record.path.clone())
        else {
            dialogs.notify(&Notice::new(
                ErrorCode::NotFound,
                "Play First",
                "No enabled scene in Build Settings.",
            ));
            self.restoration = None;
            return Ok(PlayFirstOutcome::NoEnabledScene);
        };

        if !opener.save_modified_if_user_wants() {
            return Ok(PlayFirstOutcome::Cancelled);
        }

        let restoration = RestorationList::capture(opener);
        opener.open(&first, OpenMode::Single)?;
        self.restoration = Some(restoration);
        play.start();
        info!(path = %first, "entering play mode from first enabled scene");
        Ok(PlayFirstOutcome::Started)
    }

    pub fn stop_play(&mut self, play: &mut dyn PlayMode) {
        if play.state() != PlayState::Editing {
            play.stop();
        }
    }

    pub fn pause_play(&mut self, play: &mut dyn PlayMode) {
        if play.state() == PlayState::Playing {
            play.pause();
        }
    }

    pub fn resume_play(&mut self, play: &mut dyn PlayMode) {
        if play.state() == PlayState::Paused {
            play.resume();
        }
    }

    /// Host notification hook. Returns `true` when scenes were restored.
    pub fn on_play_mode_changed(
        &mut self,
        change: PlayModeChange,
        opener: &mut dyn SceneOpener,
    ) -> anyhow::Result<bool> {
        if change != PlayModeChange::EnteredEditMode {
            return Ok(false);
        }
        let Some(restoration) = self.restoration.take() else {
            return Ok(false);
        };
        restoration.restore(opener)?;
        Ok(!restoration.is_empty())
    }

    fn after_edit(&mut self, outcome: EditOutcome) {
        if outcome.is_applied() {
            self.rebuild();
        }
    }

    fn rebuild(&mut self) {
        self.view = SceneView::build(self.session.scenes());
        let scenes = self.session.scenes();
        self.selection.retain(|path| scenes.contains(path));
    }
}

/// Shows a notice for rejections the user should hear about, then hands the
/// result back unchanged.
fn report<T>(dialogs: &mut dyn Dialogs, result: SessionResult<T>) -> SessionResult<T> {
    if let Err(err) = &result {
        if !err.is_benign() {
            if let SessionError::Store(store_err) = err {
                warn!("build settings write failed: {store_err:#}");
            }
            dialogs.notify(&Notice::from(err));
        }
    }
    result
}

#[cfg(test)]
#[path = "tests/panel_tests.rs"]
mod tests;
