use std::{collections::HashMap, fs, path::PathBuf};

use scene_session::SaveMode;

pub const CONFIG_FILE: &str = "scene_tool.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub build_settings_path: PathBuf,
    pub project_root: PathBuf,
    pub save_mode: SaveMode,
    pub log_filter: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            build_settings_path: PathBuf::from("ProjectSettings/build_scenes.toml"),
            project_root: PathBuf::from("."),
            save_mode: SaveMode::Auto,
            log_filter: "info".into(),
        }
    }
}

/// Resolves settings before logging is up, so anything worth a warning is
/// handed back for the caller to log once the subscriber is installed.
pub fn load_settings() -> (Settings, Vec<String>) {
    let mut warnings = Vec::new();
    let file_cfg = fs::read_to_string(CONFIG_FILE)
        .ok()
        .and_then(|raw| match parse_file(&raw) {
            Ok(cfg) => Some(cfg),
            Err(warning) => {
                warnings.push(warning);
                None
            }
        });
    let env: HashMap<String, String> = std::env::vars().collect();
    let settings = resolve(file_cfg.as_ref(), &env, &mut warnings);
    (settings, warnings)
}

fn parse_file(raw: &str) -> Result<HashMap<String, String>, String> {
    toml::from_str::<HashMap<String, String>>(raw)
        .map_err(|err| format!("ignoring malformed {CONFIG_FILE}: {err}"))
}

/// Defaults, then the config file, then environment. For each key the
/// `APP__` variable wins over the `SCENE_TOOL_` one.
fn resolve(
    file_cfg: Option<&HashMap<String, String>>,
    env: &HashMap<String, String>,
    warnings: &mut Vec<String>,
) -> Settings {
    let mut settings = Settings::default();

    if let Some(file_cfg) = file_cfg {
        if let Some(v) = file_cfg.get("build_settings_path") {
            settings.build_settings_path = PathBuf::from(v);
        }
        if let Some(v) = file_cfg.get("project_root") {
            settings.project_root = PathBuf::from(v);
        }
        if let Some(v) = file_cfg.get("save_mode") {
            apply_save_mode(&mut settings, v, warnings);
        }
        if let Some(v) = file_cfg.get("log_filter") {
            settings.log_filter = v.clone();
        }
    }

    if let Some(v) = env_value(env, "SCENE_TOOL_BUILD_SETTINGS", "APP__BUILD_SETTINGS_PATH") {
        settings.build_settings_path = PathBuf::from(v);
    }
    if let Some(v) = env_value(env, "SCENE_TOOL_PROJECT_ROOT", "APP__PROJECT_ROOT") {
        settings.project_root = PathBuf::from(v);
    }
    if let Some(v) = env_value(env, "SCENE_TOOL_SAVE_MODE", "APP__SAVE_MODE") {
        apply_save_mode(&mut settings, v, warnings);
    }
    if let Some(v) = env_value(env, "SCENE_TOOL_LOG", "APP__LOG_FILTER") {
        settings.log_filter = v.to_string();
    }

    settings
}

fn env_value<'a>(env: &'a HashMap<String, String>, legacy: &str, app: &str) -> Option<&'a str> {
    env.get(app).or_else(|| env.get(legacy)).map(String::as_str)
}

fn apply_save_mode(settings: &mut Settings, raw: &str, warnings: &mut Vec<String>) {
    match raw.parse::<SaveMode>() {
        Ok(mode) => settings.save_mode = mode,
        Err(err) => warnings.push(format!("keeping save mode {}: {err}", settings.save_mode)),
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
