// src/config/settings.rs
use std::path::{Path, PathBuf};
use std::time::Duration;
use anyhow::{Result, Context};
use config::{Config, Environment, File};
use serde::{Serialize, Deserialize};

pub const SETTINGS_FILE_STEM: &str = "probsim";
pub const ENV_PREFIX: &str = "PROBSIM";

/// Runtime settings that are not part of a single simulation: seeding,
/// animation pacing and where exports land.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AppSettings {
    pub seed: Option<u64>,
    pub batch_delay_ms: u64,
    pub pause_poll_ms: u64,
    pub export_dir: Option<PathBuf>,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            seed: None,
            batch_delay_ms: 30,
            pause_poll_ms: 100,
            export_dir: None,
        }
    }
}

impl AppSettings {
    /// Loads `probsim.{toml,json,yaml,ron,...}` from the working directory if
    /// present, then applies `PROBSIM_*` environment overrides.
    pub fn load() -> Result<Self> {
        Self::load_from(Path::new(SETTINGS_FILE_STEM), true)
    }

    pub fn load_from(path: &Path, with_env: bool) -> Result<Self> {
        let mut builder = Config::builder()
            .add_source(File::from(path).required(false));

        if with_env {
            builder = builder.add_source(
                Environment::with_prefix(ENV_PREFIX).try_parsing(true)
            );
        }

        builder.build()
            .and_then(|settings| settings.try_deserialize::<AppSettings>())
            .with_context(|| format!("Failed to load settings from {}", path.display()))
    }

    pub fn load_or_default() -> Self {
        match Self::load() {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("{:#}; using default settings", e);
                Self::default()
            }
        }
    }

    pub fn batch_delay(&self) -> Duration {
        Duration::from_millis(self.batch_delay_ms)
    }

    pub fn pause_poll(&self) -> Duration {
        Duration::from_millis(self.pause_poll_ms.max(1))
    }

    pub fn export_dir(&self) -> Option<PathBuf> {
        self.export_dir.clone().or_else(dirs::download_dir)
    }
}
