use crate::backend::OutputFormat;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_MAX_FILES: usize = 5;
const CONFIG_ENV: &str = "REDAX_CONFIG";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default = "default_max_files")]
    pub max_files: usize,

    #[serde(default)]
    pub default_output_format: OutputFormat,

    /// Explicit pandoc executable; `pandoc` on PATH otherwise.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pandoc_path: Option<PathBuf>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub work_dir: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            max_files: default_max_files(),
            default_output_format: OutputFormat::default(),
            pandoc_path: None,
            work_dir: None,
        }
    }
}

fn default_max_files() -> usize {
    DEFAULT_MAX_FILES
}

impl Settings {
    /// Load settings from the default location, writing defaults if missing.
    pub fn load() -> anyhow::Result<Self> {
        Self::load_from(&Self::config_path())
    }

    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let mut settings: Settings = toml::from_str(&content)?;
            if settings.max_files == 0 {
                tracing::warn!("max_files = 0 in {}, using {}", path.display(), DEFAULT_MAX_FILES);
                settings.max_files = DEFAULT_MAX_FILES;
            }
            Ok(settings)
        } else {
            let settings = Settings::default();
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(path, toml::to_string_pretty(&settings)?)?;
            tracing::info!("Wrote default settings to {}", path.display());
            Ok(settings)
        }
    }

    pub fn config_path() -> PathBuf {
        if let Some(path) = std::env::var_os(CONFIG_ENV) {
            return PathBuf::from(path);
        }
        if let Some(dirs) = directories::ProjectDirs::from("com", "redax", "redax") {
            dirs.config_dir().join("config.toml")
        } else {
            PathBuf::from(".redax/config.toml")
        }
    }

    pub fn work_dir(&self) -> PathBuf {
        self.work_dir
            .clone()
            .unwrap_or_else(|| std::env::temp_dir().join("redax-work"))
    }
}
