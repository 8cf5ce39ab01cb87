use scene_model::{protocol::DragData, protocol::DropTarget, MoveDirection, RowId, SceneRecord};
use scene_session::{SaveMode, ScenePanel};
use scene_store::{BuildSettingsStore, TomlFileStore};

#[test]
fn panel_edits_round_through_settings_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let settings = dir.path().join("ProjectSettings").join("build_scenes.toml");
    let mut seed = TomlFileStore::new(&settings);
    seed.replace(vec![
        SceneRecord::enabled("Assets/Boot.unity"),
        SceneRecord::new("Assets/Debug.unity", false),
        SceneRecord::enabled("Assets/Menu.unity"),
    ])
    .expect("seed");

    let mut panel =
        ScenePanel::open(TomlFileStore::new(&settings), SaveMode::Deferred, dir.path()).expect("open");
    panel.select(&[RowId(2), RowId(3)]);
    let _ = panel.move_selected(MoveDirection::Up).expect("move");
    panel
        .handle_drop(
            &DragData::assets(["Assets/Credits.unity"]),
            DropTarget::root(1),
            true,
        )
        .expect("drop");

    assert!(panel.is_dirty());
    assert_eq!(TomlFileStore::new(&settings).scene_count().expect("count"), 3);

    panel.save().expect("save");

    assert_eq!(
        TomlFileStore::new(&settings).load().expect("reload"),
        vec![
            SceneRecord::new("Assets/Debug.unity", false),
            SceneRecord::enabled("Assets/Credits.unity"),
            SceneRecord::enabled("Assets/Menu.unity"),
            SceneRecord::enabled("Assets/Boot.unity"),
        ]
    );
}

#[test]
fn second_writer_forces_reload() {
    let dir = tempfile::tempdir().expect("tempdir");
    let settings = dir.path().join("build_scenes.toml");

    let mut panel =
        ScenePanel::open(TomlFileStore::new(&settings), SaveMode::Auto, dir.path()).expect("open");
    assert!(panel.rows().is_empty());

    TomlFileStore::new(&settings)
        .replace(vec![SceneRecord::enabled("Assets/Other.unity")])
        .expect("external write");

    assert!(panel.refresh().expect("refresh"));
    assert_eq!(panel.rows()[0].display_name, "Other");
}
