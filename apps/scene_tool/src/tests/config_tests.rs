use super::*;

fn table(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect()
}

#[test]
fn defaults_apply_without_file_or_env() {
    let mut warnings = Vec::new();
    assert_eq!(resolve(None, &HashMap::new(), &mut warnings), Settings::default());
    assert!(warnings.is_empty());
}

#[test]
fn file_values_override_defaults() {
    let file = parse_file(
        r#"
build_settings_path = "Settings/scenes.toml"
project_root = "/work/game"
save_mode = "deferred"
"#,
    )
    .expect("parse");

    let settings = resolve(Some(&file), &HashMap::new(), &mut Vec::new());

    assert_eq!(settings.build_settings_path, PathBuf::from("Settings/scenes.toml"));
    assert_eq!(settings.project_root, PathBuf::from("/work/game"));
    assert_eq!(settings.save_mode, SaveMode::Deferred);
    assert_eq!(settings.log_filter, "info");
}

#[test]
fn env_overrides_file_and_app_prefix_wins() {
    let file = table(&[("save_mode", "deferred"), ("log_filter", "warn")]);
    let env = table(&[
        ("SCENE_TOOL_SAVE_MODE", "auto"),
        ("SCENE_TOOL_LOG", "debug"),
        ("APP__LOG_FILTER", "trace"),
    ]);

    let settings = resolve(Some(&file), &env, &mut Vec::new());

    assert_eq!(settings.save_mode, SaveMode::Auto);
    assert_eq!(settings.log_filter, "trace");
}

#[test]
fn unknown_save_mode_keeps_previous_value_and_is_reported() {
    let file = table(&[("save_mode", "whenever")]);
    let env = table(&[("APP__SAVE_MODE", "sometimes")]);
    let mut warnings = Vec::new();

    let settings = resolve(Some(&file), &env, &mut warnings);

    assert_eq!(settings.save_mode, SaveMode::Auto);
    assert_eq!(warnings.len(), 2);
    assert!(warnings[0].contains("whenever"), "{warnings:?}");
    assert!(warnings[1].contains("sometimes"), "{warnings:?}");
}

#[test]
fn malformed_file_is_reported() {
    let warning = parse_file("save_mode = [1, 2]").expect_err("malformed");
    assert!(warning.contains(CONFIG_FILE));
}
