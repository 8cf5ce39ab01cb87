use serde::{Deserialize, Serialize};

use crate::domain::{RowId, ScenePath};

/// Drag payload started from the panel's own rows.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DragPayload {
    pub scene_paths: Vec<ScenePath>,
}

impl DragPayload {
    pub fn new(scene_paths: Vec<ScenePath>) -> Self {
        Self { scene_paths }
    }

    pub fn is_empty(&self) -> bool {
        self.scene_paths.is_empty()
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn from_json(raw: &str) -> serde_json::Result<Self> {
        serde_json::from_str(raw)
    }
}

/// Everything the host hands over while something is dragged over the panel:
/// the panel's own payload (if the drag started in the panel) and the asset
/// paths of any project objects being dragged in from outside.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DragData {
    pub internal: Option<DragPayload>,
    pub asset_paths: Vec<String>,
}

impl DragData {
    pub fn internal(payload: DragPayload) -> Self {
        Self {
            internal: Some(payload),
            asset_paths: Vec::new(),
        }
    }

    pub fn assets<I, S>(paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            internal: None,
            asset_paths: paths.into_iter().map(Into::into).collect(),
        }
    }

    /// Internal payload first, then external scene assets not already listed.
    /// Non-scene assets and empty paths are skipped.
    pub fn dropped_paths(&self) -> Vec<ScenePath> {
        let mut dropped: Vec<ScenePath> = self
            .internal
            .as_ref()
            .map(|payload| payload.scene_paths.clone())
            .unwrap_or_default();

        for raw in &self.asset_paths {
            let path = ScenePath::new(raw.as_str());
            if path.is_scene_asset() && !dropped.contains(&path) {
                dropped.push(path);
            }
        }

        dropped
    }
}

/// Where the host reports the cursor is: the row the drop would become a
/// child of (`None` or the root for the flat list) and the insertion slot.
/// A negative slot means "onto the parent itself", which appends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DropTarget {
    pub parent: Option<RowId>,
    pub insert_at: isize,
}

impl DropTarget {
    pub fn root(insert_at: isize) -> Self {
        Self {
            parent: Some(RowId::ROOT),
            insert_at,
        }
    }

    pub fn is_top_level(&self) -> bool {
        self.parent.map_or(true, RowId::is_root)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropVisual {
    None,
    Move,
}
