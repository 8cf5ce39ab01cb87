use std::{fmt, str::FromStr};

use scene_model::{EditOutcome, MoveDirection, SceneList, SceneListError, ScenePath};
use scene_store::BuildSettingsStore;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::SessionResult;

/// When edits reach the host array.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SaveMode {
    /// Every applied edit is written through immediately.
    #[default]
    Auto,
    /// Edits accumulate until [`EditSession::save`].
    Deferred,
}

impl FromStr for SaveMode {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "auto" => Ok(Self::Auto),
            "deferred" | "manual" => Ok(Self::Deferred),
            other => Err(format!("unknown save mode '{other}' (expected auto or deferred)")),
        }
    }
}

impl fmt::Display for SaveMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Auto => f.write_str("auto"),
            Self::Deferred => f.write_str("deferred"),
        }
    }
}

/// In-memory copy of the build list, owned for the lifetime of one editing
/// session and mirrored to the store on save.
pub struct EditSession<S> {
    store: S,
    scenes: SceneList,
    mode: SaveMode,
    dirty: bool,
    /// Host array length seen at the last load or save.
    synced_len: usize,
}

impl<S: BuildSettingsStore> EditSession<S> {
    pub fn open(store: S, mode: SaveMode) -> SessionResult<Self> {
        let records = store.load()?;
        let synced_len = records.len();
        let scenes = SceneList::from_records(records);
        info!(scenes = scenes.len(), %mode, "scene list session opened");
        Ok(Self {
            store,
            scenes,
            mode,
            dirty: false,
            synced_len,
        })
    }

    pub fn scenes(&self) -> &SceneList {
        &self.scenes
    }

    pub fn mode(&self) -> SaveMode {
        self.mode
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// Switching to auto-save flushes any pending edits.
    pub fn set_mode(&mut self, mode: SaveMode) -> SessionResult<()> {
        self.mode = mode;
        if mode == SaveMode::Auto && self.dirty {
            self.save()?;
        }
        Ok(())
    }

    pub fn add(&mut self, path: ScenePath) -> SessionResult<()> {
        self.edit(|scenes| scenes.add(path).map(|()| EditOutcome::Applied))
            .map(|_| ())
    }

    pub fn remove(&mut self, path: &ScenePath) -> SessionResult<EditOutcome> {
        self.edit(|scenes| Ok(scenes.remove(path)))
    }

    pub fn remove_many(&mut self, paths: &[ScenePath]) -> SessionResult<EditOutcome> {
        self.edit(|scenes| Ok(scenes.remove_many(paths)))
    }

    pub fn move_single(&mut self, path: &ScenePath, delta: isize) -> SessionResult<EditOutcome> {
        self.edit(|scenes| Ok(scenes.move_single(path, delta)))
    }

    pub fn move_selection_block(
        &mut self,
        selected: &[ScenePath],
        direction: MoveDirection,
    ) -> SessionResult<EditOutcome> {
        self.edit(|scenes| Ok(scenes.move_selection_block(selected, direction)))
    }

    pub fn drop_paths(&mut self, dropped: &[ScenePath], insert_at: isize) -> SessionResult<EditOutcome> {
        self.edit(|scenes| Ok(scenes.drop_paths(dropped, insert_at)))
    }

    pub fn set_enabled(&mut self, path: &ScenePath, enabled: bool) -> SessionResult<EditOutcome> {
        self.edit(|scenes| Ok(scenes.set_enabled(path, enabled)))
    }

    pub fn toggle_enabled(&mut self, path: &ScenePath) -> SessionResult<EditOutcome> {
        self.edit(|scenes| Ok(scenes.toggle_enabled(path)))
    }

    /// Writes the whole list to the store.
    pub fn save(&mut self) -> SessionResult<()> {
        let records = self.scenes.flush();
        let count = records.len();
        self.store.replace(records)?;
        self.synced_len = count;
        self.dirty = false;
        info!(scenes = count, "scene list flushed to build settings");
        Ok(())
    }

    /// Drops pending edits and re-reads the store.
    pub fn discard(&mut self) -> SessionResult<()> {
        if self.dirty {
            debug!("discarding unsaved scene list edits");
        }
        self.reload()
    }

    pub fn reload(&mut self) -> SessionResult<()> {
        let records = self.store.load()?;
        self.synced_len = records.len();
        self.scenes = SceneList::from_records(records);
        self.dirty = false;
        info!(scenes = self.scenes.len(), "scene list reloaded from build settings");
        Ok(())
    }

    /// Someone else resized the host array since this session last synced.
    pub fn external_change_detected(&self) -> SessionResult<bool> {
        Ok(self.store.scene_count()? != self.synced_len)
    }

    /// Reloads when the host array changed underneath the session. Unsaved
    /// edits are lost in that case.
    pub fn sync_with_store(&mut self) -> SessionResult<bool> {
        if !self.external_change_detected()? {
            return Ok(false);
        }
        if self.dirty {
            warn!("build settings changed externally; discarding unsaved scene list edits");
        }
        self.reload()?;
        Ok(true)
    }

    /// Applies `op` to a copy and commits it whole. In auto-save mode a
    /// failed write puts the previous list back.
    fn edit<F>(&mut self, op: F) -> SessionResult<EditOutcome>
    where
        F: FnOnce(&mut SceneList) -> Result<EditOutcome, SceneListError>,
    {
        let mut next = self.scenes.clone();
        let outcome = op(&mut next)?;
        if !outcome.is_applied() {
            return Ok(outcome);
        }

        let previous = std::mem::replace(&mut self.scenes, next);
        let was_dirty = self.dirty;
        self.dirty = true;

        if self.mode == SaveMode::Auto {
            if let Err(err) = self.save() {
                self.scenes = previous;
                self.dirty = was_dirty;
                return Err(err);
            }
        }

        Ok(outcome)
    }
}

#[cfg(test)]
#[path = "tests/session_tests.rs"]
mod tests;
