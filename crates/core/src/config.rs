//! Application configuration.
//!
//! Settings layer three sources: built-in defaults, a TOML file under the
//! user config directory, and `STRIKLE_*` environment overrides.

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{bail, Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::engine::DEFAULT_MAX_ATTEMPTS;

/// Directory name under the user config dir.
pub const CONFIG_DIR: &str = "strikle";
const CONFIG_FILE: &str = "config.toml";

const DEFAULT_CONFIG: &str = r#"# Strikle configuration.

# Maximum guesses per game. Must be at least 1.
max_attempts = 6

# Path to the player roster CSV. Relative paths resolve against the
# working directory.
roster_path = "data/players.csv"
"#;

/// Runtime settings for the game engine and its frontends.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Attempt budget per game.
    pub max_attempts: u32,
    /// Location of the roster CSV.
    pub roster_path: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            roster_path: PathBuf::from("data/players.csv"),
        }
    }
}

/// Location of the on-disk config file.
pub fn config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(CONFIG_DIR)
        .join(CONFIG_FILE)
}

/// Write the commented default config file if none exists yet.
pub fn ensure_default_config() -> Result<()> {
    let path = config_path();
    if path.exists() {
        return Ok(());
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    fs::write(&path, DEFAULT_CONFIG)
        .with_context(|| format!("failed to write default config {}", path.display()))
}

impl AppConfig {
    /// Load configuration from the default location.
    pub fn load() -> Result<Self> {
        Self::load_from(config_path())
    }

    /// Load configuration layered over the given file (which may be
    /// absent) plus environment overrides.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let defaults = AppConfig::default();
        let settings = Config::builder()
            .set_default("max_attempts", i64::from(defaults.max_attempts))?
            .set_default(
                "roster_path",
                defaults.roster_path.to_string_lossy().to_string(),
            )?
            .add_source(File::from(path.as_ref().to_path_buf()).required(false))
            .add_source(Environment::with_prefix("STRIKLE"))
            .build()
            .context("failed to read configuration")?;

        let config: AppConfig = settings
            .try_deserialize()
            .context("invalid configuration")?;
        if config.max_attempts == 0 {
            bail!("max_attempts must be at least 1");
        }
        Ok(config)
    }
}
