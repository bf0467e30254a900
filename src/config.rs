use anyhow::{Context, Result, bail};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

const APP_DIR: &str = "wavywalls";

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// TOML file with `[[wallpaper]]` entries.
    pub catalog_file: Option<PathBuf>,
    /// Folder of images to browse when no catalog file is set.
    pub wallpaper_dir: Option<PathBuf>,
    pub tick_rate_ms: u64,
    pub log_level: String,
    pub log_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            catalog_file: None,
            wallpaper_dir: None,
            tick_rate_ms: 200,
            log_level: "info".to_string(),
            log_file: None,
        }
    }
}

impl Config {
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join(APP_DIR).join("config.toml"))
    }

    pub fn from_toml_str(s: &str) -> Result<Self> {
        toml::from_str(s).context("invalid config")
    }

    /// Reads `path`, falling back to defaults when the file does not exist.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        Self::from_toml_str(&content).with_context(|| format!("in {}", path.display()))
    }

    /// Loads the config named on the command line, or the one in the
    /// user config dir. Only the user config may be absent.
    pub fn load(explicit: Option<PathBuf>) -> Result<Self> {
        if let Some(path) = explicit {
            if !path.is_file() {
                bail!("config file {} does not exist", path.display());
            }
            return Self::load_from_file(path);
        }
        match Self::default_path() {
            Some(path) => Self::load_from_file(path),
            None => Ok(Self::default()),
        }
    }

    pub fn tick_rate(&self) -> Duration {
        Duration::from_millis(self.tick_rate_ms.max(10))
    }

    pub fn log_path(&self) -> PathBuf {
        self.log_file.clone().unwrap_or_else(|| {
            dirs::cache_dir()
                .unwrap_or_else(std::env::temp_dir)
                .join(APP_DIR)
                .join("wavywalls.log")
        })
    }
}
