//! Pure reordering of scene paths. Every function works on a copy of the
//! order it is given and returns the new order, so callers either commit the
//! whole result or keep what they had.

use std::collections::{HashMap, HashSet};

use crate::domain::{MoveDirection, ScenePath, SceneRecord};

/// Moves `path` by `delta` positions. `None` when the path is absent or the
/// target slot falls outside the list.
pub fn move_single(order: &[ScenePath], path: &ScenePath, delta: isize) -> Option<Vec<ScenePath>> {
    let index = order.iter().position(|candidate| candidate == path)?;
    let target = index.checked_add_signed(delta)?;
    if target >= order.len() || target == index {
        return None;
    }

    let mut next = order.to_vec();
    let moved = next.remove(index);
    next.insert(target, moved);
    Some(next)
}

/// Moves every maximal run of selected paths one step in `direction`, past the
/// unselected neighbor in front of it. Runs already at the edge stay put.
///
/// Up scans left to right and Down scans right to left, so a displaced
/// neighbor never lands inside a run that has yet to be visited.
pub fn move_selection_block(
    order: &[ScenePath],
    selected: &HashSet<ScenePath>,
    direction: MoveDirection,
) -> Vec<ScenePath> {
    let mut next = order.to_vec();
    if selected.is_empty() || next.len() < 2 {
        return next;
    }

    match direction {
        MoveDirection::Up => {
            let mut i = 1;
            while i < next.len() {
                if selected.contains(&next[i]) && !selected.contains(&next[i - 1]) {
                    let end = run_end(&next, i, selected);
                    next[i - 1..=end].rotate_left(1);
                    i = end + 1;
                } else {
                    i += 1;
                }
            }
        }
        MoveDirection::Down => {
            let mut cursor = next.len().checked_sub(2);
            while let Some(i) = cursor {
                if selected.contains(&next[i]) && !selected.contains(&next[i + 1]) {
                    let start = run_start(&next, i, selected);
                    next[start..=i + 1].rotate_right(1);
                    cursor = start.checked_sub(1);
                } else {
                    cursor = i.checked_sub(1);
                }
            }
        }
    }

    next
}

fn run_end(order: &[ScenePath], from: usize, selected: &HashSet<ScenePath>) -> usize {
    let mut end = from;
    while end + 1 < order.len() && selected.contains(&order[end + 1]) {
        end += 1;
    }
    end
}

fn run_start(order: &[ScenePath], from: usize, selected: &HashSet<ScenePath>) -> usize {
    let mut start = from;
    while start > 0 && selected.contains(&order[start - 1]) {
        start -= 1;
    }
    start
}

/// Drag-and-drop placement. Dropped paths already in `current` are taken out
/// first, then inserted as one contiguous block at `insert_at`, which is an
/// index into the list *after* that removal. Slots past the end and negative
/// slots (a drop onto the parent row itself) append.
pub fn reconcile(current: &[ScenePath], dropped: &[ScenePath], insert_at: isize) -> Vec<ScenePath> {
    let mut seen = HashSet::with_capacity(dropped.len());
    let block: Vec<ScenePath> = dropped
        .iter()
        .filter(|path| seen.insert(*path))
        .cloned()
        .collect();

    let mut next: Vec<ScenePath> = current
        .iter()
        .filter(|path| !seen.contains(path))
        .cloned()
        .collect();

    let index = usize::try_from(insert_at)
        .ok()
        .filter(|index| *index <= next.len())
        .unwrap_or(next.len());
    next.splice(index..index, block);
    next
}

/// Pairs every path with its enabled flag. Paths without a known flag are
/// enabled.
pub fn flush(order: &[ScenePath], enabled: &HashMap<ScenePath, bool>) -> Vec<SceneRecord> {
    order
        .iter()
        .map(|path| SceneRecord {
            path: path.clone(),
            enabled: enabled.get(path).copied().unwrap_or(true),
        })
        .collect()
}

#[cfg(test)]
#[path = "tests/reorder_tests.rs"]
mod tests;
