use scene_model::ScenePath;
use tracing::{debug, info};

use crate::host::{OpenMode, SceneOpener};

/// Scenes that were open before a play-first session, in load order, and
/// which of them was active.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RestorationList {
    pub paths: Vec<ScenePath>,
    pub active: Option<ScenePath>,
}

impl RestorationList {
    pub fn capture(opener: &dyn SceneOpener) -> Self {
        let captured = Self {
            paths: opener.open_scenes(),
            active: opener.active_scene(),
        };
        debug!(scenes = captured.paths.len(), "captured open scenes before play");
        captured
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Reopens the first scene alone, the rest additively, then re-activates
    /// the scene that was active.
    pub fn restore(&self, opener: &mut dyn SceneOpener) -> anyhow::Result<()> {
        let mut paths = self.paths.iter();
        let Some(first) = paths.next() else {
            return Ok(());
        };

        opener.open(first, OpenMode::Single)?;
        for path in paths {
            opener.open(path, OpenMode::Additive)?;
        }
        if let Some(active) = &self.active {
            if self.paths.contains(active) {
                opener.set_active(active)?;
            }
        }

        info!(scenes = self.paths.len(), "restored scenes after play");
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayFirstOutcome {
    Started,
    AlreadyPlaying,
    Cancelled,
    NoEnabledScene,
}
