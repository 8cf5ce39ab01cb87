use scene_model::{RowId, SceneList, ScenePath};

pub const ROOT_LABEL: &str = "Scene Management";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SceneRow {
    pub id: RowId,
    pub depth: i32,
    pub display_name: String,
    pub path: ScenePath,
    pub enabled: bool,
}

/// Flat rows under a single root, rebuilt from the list on every reload.
/// Row ids follow list position, so they are only good until the next rebuild.
#[derive(Debug, Clone, Default)]
pub struct SceneView {
    rows: Vec<SceneRow>,
}

impl SceneView {
    pub fn build(scenes: &SceneList) -> Self {
        let rows = scenes
            .iter()
            .zip(1..)
            .map(|(record, id)| SceneRow {
                id: RowId(id),
                depth: 1,
                display_name: record.path.display_name().to_string(),
                path: record.path.clone(),
                enabled: record.enabled,
            })
            .collect();
        Self { rows }
    }

    pub fn rows(&self) -> &[SceneRow] {
        &self.rows
    }

    pub fn row(&self, id: RowId) -> Option<&SceneRow> {
        self.rows.iter().find(|row| row.id == id)
    }

    pub fn path_for(&self, id: RowId) -> Option<&ScenePath> {
        self.row(id).map(|row| &row.path)
    }

    /// Paths behind `ids` in the order given. Unknown ids and repeats are skipped.
    pub fn paths_for(&self, ids: &[RowId]) -> Vec<ScenePath> {
        let mut paths: Vec<ScenePath> = Vec::with_capacity(ids.len());
        for path in ids.iter().filter_map(|id| self.path_for(*id)) {
            if !paths.contains(path) {
                paths.push(path.clone());
            }
        }
        paths
    }
}
