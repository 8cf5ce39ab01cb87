use std::collections::{HashMap, HashSet};

use tracing::{debug, warn};

use crate::{
    domain::{EditOutcome, MoveDirection, ScenePath, SceneRecord},
    error::SceneListError,
    reorder,
};

/// Ordered, duplicate-free list of scenes. Position is build order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SceneList {
    records: Vec<SceneRecord>,
}

impl SceneList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copies a host array. A path listed more than once keeps its first
    /// occurrence.
    pub fn from_records(records: impl IntoIterator<Item = SceneRecord>) -> Self {
        let mut seen = HashSet::new();
        let mut kept = Vec::new();
        for record in records {
            if seen.insert(record.path.clone()) {
                kept.push(record);
            } else {
                warn!(path = %record.path, "dropping duplicate scene entry from build settings");
            }
        }
        Self { records: kept }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[SceneRecord] {
        &self.records
    }

    pub fn iter(&self) -> impl Iterator<Item = &SceneRecord> {
        self.records.iter()
    }

    pub fn order(&self) -> Vec<ScenePath> {
        self.records.iter().map(|record| record.path.clone()).collect()
    }

    pub fn position(&self, path: &ScenePath) -> Option<usize> {
        self.records.iter().position(|record| &record.path == path)
    }

    pub fn contains(&self, path: &ScenePath) -> bool {
        self.position(path).is_some()
    }

    pub fn get(&self, path: &ScenePath) -> Option<&SceneRecord> {
        self.records.iter().find(|record| &record.path == path)
    }

    pub fn first_enabled(&self) -> Option<&SceneRecord> {
        self.records.iter().find(|record| record.enabled)
    }

    pub fn add(&mut self, path: ScenePath) -> Result<(), SceneListError> {
        if self.contains(&path) {
            return Err(SceneListError::DuplicateKey(path));
        }
        debug!(path = %path, index = self.records.len(), "scene added");
        self.records.push(SceneRecord::enabled(path));
        Ok(())
    }

    pub fn remove(&mut self, path: &ScenePath) -> EditOutcome {
        self.remove_many(std::slice::from_ref(path))
    }

    pub fn remove_many(&mut self, paths: &[ScenePath]) -> EditOutcome {
        let before = self.records.len();
        self.records.retain(|record| !paths.contains(&record.path));
        let removed = before - self.records.len();
        if removed > 0 {
            debug!(removed, "scenes removed");
        }
        EditOutcome::from_changed(removed > 0)
    }

    /// Replaces the record at `path` with one carrying `enabled`.
    pub fn set_enabled(&mut self, path: &ScenePath, enabled: bool) -> EditOutcome {
        let Some(index) = self.position(path) else {
            return EditOutcome::Unchanged;
        };
        if self.records[index].enabled == enabled {
            return EditOutcome::Unchanged;
        }
        self.records[index] = SceneRecord::new(path.clone(), enabled);
        debug!(path = %path, enabled, "scene enabled flag changed");
        EditOutcome::Applied
    }

    pub fn toggle_enabled(&mut self, path: &ScenePath) -> EditOutcome {
        match self.get(path).map(|record| record.enabled) {
            Some(enabled) => self.set_enabled(path, !enabled),
            None => EditOutcome::Unchanged,
        }
    }

    pub fn move_single(&mut self, path: &ScenePath, delta: isize) -> EditOutcome {
        match reorder::move_single(&self.order(), path, delta) {
            Some(order) => {
                debug!(path = %path, delta, "scene moved");
                self.apply_order(&order)
            }
            None => EditOutcome::Unchanged,
        }
    }

    pub fn move_selection_block<'a, I>(&mut self, selected: I, direction: MoveDirection) -> EditOutcome
    where
        I: IntoIterator<Item = &'a ScenePath>,
    {
        let selected: HashSet<ScenePath> = selected
            .into_iter()
            .filter(|path| self.contains(path))
            .cloned()
            .collect();
        if selected.is_empty() {
            return EditOutcome::Unchanged;
        }
        let order = reorder::move_selection_block(&self.order(), &selected, direction);
        debug!(selected = selected.len(), ?direction, "selection moved");
        self.apply_order(&order)
    }

    /// Places `dropped` as one block at `insert_at`; paths new to the list
    /// come in enabled.
    pub fn drop_paths(&mut self, dropped: &[ScenePath], insert_at: isize) -> EditOutcome {
        if dropped.is_empty() {
            return EditOutcome::Unchanged;
        }
        let order = reorder::reconcile(&self.order(), dropped, insert_at);
        debug!(dropped = dropped.len(), insert_at, "scenes dropped");
        self.apply_order(&order)
    }

    pub fn enabled_map(&self) -> HashMap<ScenePath, bool> {
        self.records
            .iter()
            .map(|record| (record.path.clone(), record.enabled))
            .collect()
    }

    /// The array handed to the host on save.
    pub fn flush(&self) -> Vec<SceneRecord> {
        reorder::flush(&self.order(), &self.enabled_map())
    }

    fn apply_order(&mut self, order: &[ScenePath]) -> EditOutcome {
        let next = reorder::flush(order, &self.enabled_map());
        if next == self.records {
            return EditOutcome::Unchanged;
        }
        self.records = next;
        EditOutcome::Applied
    }
}

impl FromIterator<SceneRecord> for SceneList {
    fn from_iter<T: IntoIterator<Item = SceneRecord>>(iter: T) -> Self {
        Self::from_records(iter)
    }
}

#[cfg(test)]
#[path = "tests/list_tests.rs"]
mod tests;
