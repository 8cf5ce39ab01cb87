use super::*;

fn paths(names: &[&str]) -> Vec<ScenePath> {
    names.iter().map(|name| ScenePath::new(*name)).collect()
}

fn selection(names: &[&str]) -> HashSet<ScenePath> {
    names.iter().map(|name| ScenePath::new(*name)).collect()
}

/// Independent model of a one-step block move: every movable run is keyed
/// half a slot in front of its neighbor, then a stable sort does the rest.
fn expected_block_move(
    order: &[ScenePath],
    selected: &HashSet<ScenePath>,
    direction: MoveDirection,
) -> Vec<ScenePath> {
    let len = order.len() as i64;
    let mut keyed: Vec<(i64, ScenePath)> = Vec::with_capacity(order.len());
    let mut i = 0usize;
    while i < order.len() {
        if !selected.contains(&order[i]) {
            keyed.push((2 * i as i64, order[i].clone()));
            i += 1;
            continue;
        }
        let start = i;
        let mut end = i;
        while end + 1 < order.len() && selected.contains(&order[end + 1]) {
            end += 1;
        }
        for (offset, path) in order[start..=end].iter().enumerate() {
            let key = match direction {
                MoveDirection::Up if start > 0 => 2 * (start as i64 - 1) - 1,
                MoveDirection::Down if (end as i64) + 1 < len => 2 * (end as i64 + 1) + 1,
                _ => 2 * (start + offset) as i64,
            };
            keyed.push((key, path.clone()));
        }
        i = end + 1;
    }
    keyed.sort_by_key(|(key, _)| *key);
    keyed.into_iter().map(|(_, path)| path).collect()
}

#[test]
fn move_single_shifts_one_slot() {
    let order = paths(&["A", "B", "C"]);
    let moved = move_single(&order, &ScenePath::new("B"), 1).expect("moved");
    assert_eq!(moved, paths(&["A", "C", "B"]));
}

#[test]
fn move_single_at_boundary_is_rejected() {
    let order = paths(&["A", "B", "C"]);
    assert!(move_single(&order, &ScenePath::new("A"), -1).is_none());
    assert!(move_single(&order, &ScenePath::new("C"), 1).is_none());
    assert!(move_single(&order, &ScenePath::new("missing"), 1).is_none());
}

#[test]
fn move_single_down_then_up_is_identity() {
    let order = paths(&["A", "B", "C", "D"]);
    let path = ScenePath::new("B");
    let down = move_single(&order, &path, 1).expect("down");
    let back = move_single(&down, &path, -1).expect("up");
    assert_eq!(back, order);
}

#[test]
fn contiguous_block_moves_up_past_its_neighbor() {
    let order = paths(&["A", "B", "C", "D"]);
    let moved = move_selection_block(&order, &selection(&["B", "C"]), MoveDirection::Up);
    assert_eq!(moved, paths(&["B", "C", "A", "D"]));
}

#[test]
fn contiguous_block_moves_down_past_its_neighbor() {
    let order = paths(&["A", "B", "C", "D"]);
    let moved = move_selection_block(&order, &selection(&["B", "C"]), MoveDirection::Down);
    assert_eq!(moved, paths(&["A", "D", "B", "C"]));
}

#[test]
fn disjoint_blocks_move_independently() {
    let order = paths(&["A", "S1", "B", "S2", "S3", "C"]);
    let up = move_selection_block(&order, &selection(&["S1", "S2", "S3"]), MoveDirection::Up);
    assert_eq!(up, paths(&["S1", "A", "S2", "S3", "B", "C"]));

    let down = move_selection_block(&order, &selection(&["S1", "S2", "S3"]), MoveDirection::Down);
    assert_eq!(down, paths(&["A", "B", "S1", "C", "S2", "S3"]));
}

#[test]
fn block_pinned_at_edge_stays_while_others_move() {
    let order = paths(&["S1", "A", "S2"]);
    let up = move_selection_block(&order, &selection(&["S1", "S2"]), MoveDirection::Up);
    assert_eq!(up, paths(&["S1", "S2", "A"]));

    let down = move_selection_block(&order, &selection(&["S1", "S2"]), MoveDirection::Down);
    assert_eq!(down, paths(&["A", "S1", "S2"]));
}

#[test]
fn empty_selection_leaves_order() {
    let order = paths(&["A", "B"]);
    assert_eq!(
        move_selection_block(&order, &HashSet::new(), MoveDirection::Up),
        order
    );
}

#[test]
fn block_move_matches_model_for_every_selection() {
    let names = ["A", "B", "C", "D", "E", "F", "G"];
    for len in 0..=names.len() {
        let order = paths(&names[..len]);
        for mask in 0u32..(1 << len) {
            let selected: HashSet<ScenePath> = order
                .iter()
                .enumerate()
                .filter(|(index, _)| mask & (1 << index) != 0)
                .map(|(_, path)| path.clone())
                .collect();
            for direction in [MoveDirection::Up, MoveDirection::Down] {
                let moved = move_selection_block(&order, &selected, direction);
                assert_eq!(
                    moved,
                    expected_block_move(&order, &selected, direction),
                    "len={len} mask={mask:#b} direction={direction:?}"
                );

                let selected_before: Vec<_> =
                    order.iter().filter(|path| selected.contains(*path)).collect();
                let selected_after: Vec<_> =
                    moved.iter().filter(|path| selected.contains(*path)).collect();
                assert_eq!(selected_before, selected_after);

                let others_before: Vec<_> =
                    order.iter().filter(|path| !selected.contains(*path)).collect();
                let others_after: Vec<_> =
                    moved.iter().filter(|path| !selected.contains(*path)).collect();
                assert_eq!(others_before, others_after);
            }
        }
    }
}

#[test]
fn drop_to_end_relocates_existing_path() {
    let order = paths(&["A", "B", "C"]);
    assert_eq!(reconcile(&order, &paths(&["A"]), 2), paths(&["B", "C", "A"]));
}

#[test]
fn drop_never_duplicates() {
    let order = paths(&["A", "B", "C"]);
    let result = reconcile(&order, &paths(&["C", "A", "C"]), 0);
    assert_eq!(result, paths(&["C", "A", "B"]));
}

#[test]
fn drop_inserts_new_paths_as_block() {
    let order = paths(&["A", "B"]);
    let result = reconcile(&order, &paths(&["X", "Y"]), 1);
    assert_eq!(result, paths(&["A", "X", "Y", "B"]));
}

#[test]
fn drop_slot_out_of_range_appends() {
    let order = paths(&["A", "B"]);
    assert_eq!(reconcile(&order, &paths(&["X"]), 10), paths(&["A", "B", "X"]));
    assert_eq!(reconcile(&order, &paths(&["X"]), -1), paths(&["A", "B", "X"]));
}

#[test]
fn flush_defaults_unknown_paths_to_enabled() {
    let order = paths(&["A", "B"]);
    let enabled = HashMap::from([(ScenePath::new("A"), false)]);
    assert_eq!(
        flush(&order, &enabled),
        vec![SceneRecord::new("A", false), SceneRecord::new("B", true)]
    );
}
