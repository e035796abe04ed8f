use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, bail};

use crate::retention::{DEFAULT_PATTERN, FilePattern, RetentionWindow, TargetDirectory};

// ---------- Root ----------
/// Owned by whoever persists it; the engine only ever sees `targets()` and `window`.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// Primary target. Missing on disk aborts a run.
    pub act_directory: PathBuf,
    /// Network capture tool output. Missing on disk counts as empty.
    /// An absent key means no secondary target.
    #[serde(default)]
    pub capture_directory: Option<PathBuf>,
    pub pattern: String,
    pub window: RetentionWindow,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            act_directory: env_dir("APPDATA", &[".config"])
                .join("Advanced Combat Tracker")
                .join("FFXIVLogs"),
            capture_directory: Some(env_dir("USERPROFILE", &[]).join("Documents").join("IINACT")),
            pattern: DEFAULT_PATTERN.to_string(),
            window: RetentionWindow::default(),
        }
    }
}

fn env_dir(var: &str, home_fallback: &[&str]) -> PathBuf {
    if let Some(dir) = std::env::var_os(var) {
        return PathBuf::from(dir);
    }
    let mut dir = std::env::var_os("HOME").map(PathBuf::from).unwrap_or_default();
    for part in home_fallback {
        dir.push(part);
    }
    dir
}

// ---------- Loader ----------
impl Config {
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("cannot read config {:?}", path))?;
        let config: Self =
            toml::from_str(&content).with_context(|| format!("cannot parse config {:?}", path))?;
        config.validate().context("config validation failed")?;
        Ok(config)
    }

    /// Like `load`, but a missing file yields the built-in defaults.
    pub fn load_or_default(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            log::info!("[config] {:?} not found, using defaults", path);
            return Ok(Self::default());
        }
        Self::load(path)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> anyhow::Result<()> {
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.act_directory.as_os_str().is_empty() {
            bail!("act_directory must not be empty");
        }
        if let Some(dir) = &self.capture_directory {
            if dir.as_os_str().is_empty() {
                bail!("capture_directory must not be empty when set");
            }
        }
        if self.pattern.trim().is_empty() {
            bail!("pattern must not be empty");
        }
        FilePattern::new(&self.pattern)?;
        Ok(())
    }

    /// Primary first, then the capture directory if configured.
    pub fn targets(&self) -> anyhow::Result<Vec<TargetDirectory>> {
        let mut targets = vec![TargetDirectory::new(&self.act_directory, &self.pattern)?];
        if let Some(dir) = &self.capture_directory {
            targets.push(TargetDirectory::new(dir, &self.pattern)?);
        }
        Ok(targets)
    }
}
