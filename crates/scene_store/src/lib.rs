use anyhow::{Context, Result};
use scene_model::SceneRecord;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::{debug, info};

/// The host-owned build configuration: one ordered array of scenes, read
/// whole and replaced whole.
pub trait BuildSettingsStore {
    fn load(&self) -> Result<Vec<SceneRecord>>;

    fn replace(&mut self, scenes: Vec<SceneRecord>) -> Result<()>;

    fn scene_count(&self) -> Result<usize> {
        Ok(self.load()?.len())
    }
}

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    scenes: Vec<SceneRecord>,
    writes: usize,
}

impl MemoryStore {
    pub fn new(scenes: Vec<SceneRecord>) -> Self {
        Self { scenes, writes: 0 }
    }

    pub fn scenes(&self) -> &[SceneRecord] {
        &self.scenes
    }

    /// Number of whole-array replaces seen so far.
    pub fn writes(&self) -> usize {
        self.writes
    }

    /// Edits the array behind the session's back, the way another editor
    /// window would.
    pub fn external_replace(&mut self, scenes: Vec<SceneRecord>) {
        self.scenes = scenes;
    }
}

impl BuildSettingsStore for MemoryStore {
    fn load(&self) -> Result<Vec<SceneRecord>> {
        Ok(self.scenes.clone())
    }

    fn replace(&mut self, scenes: Vec<SceneRecord>) -> Result<()> {
        self.scenes = scenes;
        self.writes += 1;
        Ok(())
    }

    fn scene_count(&self) -> Result<usize> {
        Ok(self.scenes.len())
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct BuildSettingsFile {
    #[serde(default)]
    scenes: Vec<SceneRecord>,
}

/// Build settings kept in a TOML file of `[[scenes]]` tables.
#[derive(Debug, Clone)]
pub struct TomlFileStore {
    path: PathBuf,
}

impl TomlFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl BuildSettingsStore for TomlFileStore {
    fn load(&self) -> Result<Vec<SceneRecord>> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "build settings file missing; starting empty");
            return Ok(Vec::new());
        }

        let raw = fs::read_to_string(&self.path)
            .with_context(|| format!("failed to read build settings '{}'", self.path.display()))?;
        let file: BuildSettingsFile = toml::from_str(&raw)
            .with_context(|| format!("failed to parse build settings '{}'", self.path.display()))?;
        Ok(file.scenes)
    }

    fn replace(&mut self, scenes: Vec<SceneRecord>) -> Result<()> {
        ensure_parent_dir_exists(&self.path)?;

        let count = scenes.len();
        let raw = toml::to_string_pretty(&BuildSettingsFile { scenes })
            .context("failed to encode build settings")?;

        let staging = staging_path(&self.path);
        fs::write(&staging, raw)
            .with_context(|| format!("failed to write '{}'", staging.display()))?;
        if let Err(err) = fs::rename(&staging, &self.path) {
            let _ = fs::remove_file(&staging);
            return Err(err).with_context(|| {
                format!(
                    "failed to move '{}' over '{}'",
                    staging.display(),
                    self.path.display()
                )
            });
        }

        info!(path = %self.path.display(), scenes = count, "build settings written");
        Ok(())
    }
}

fn staging_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|name| name.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

fn ensure_parent_dir_exists(path: &Path) -> Result<()> {
    let Some(parent) = path.parent() else {
        return Ok(());
    };
    if parent.as_os_str().is_empty() {
        return Ok(());
    }

    fs::create_dir_all(parent).with_context(|| {
        format!(
            "failed to create parent directory '{}' for build settings '{}'",
            parent.display(),
            path.display()
        )
    })?;

    Ok(())
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
