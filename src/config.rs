//! Launch configuration: which target to write, from which inputs, to where

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::mapping::{MappingError, TargetType};
use crate::persistence::OutputFormat;

const CONFIG_DIR: &str = "padmap";
const CONFIG_FILE: &str = "launch.toml";
const DATABASE_FILE: &str = "gamecontrollerdb.txt";

/// Settings of one generator run, read from `launch.toml`
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct LaunchConfig {
    pub target: TargetType,
    /// SDL community database; a missing file only disables database lookups
    pub database: Option<PathBuf>,
    /// Device manifest; connected gamepads are enumerated when absent
    pub devices: Option<PathBuf>,
    /// Target file; the artifact goes to stdout when absent
    pub output: Option<PathBuf>,
    /// Overrides the encoder's native format
    pub format: Option<OutputFormat>,
    pub log_level: String,
    /// Can only lower the encoder's player cap
    pub max_players: Option<usize>,
}

impl Default for LaunchConfig {
    fn default() -> Self {
        Self {
            target: TargetType::Structured,
            database: default_database_path(),
            devices: None,
            output: None,
            format: None,
            log_level: "info".to_string(),
            max_players: None,
        }
    }
}

impl LaunchConfig {
    /// `<config dir>/padmap/launch.toml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(CONFIG_DIR).join(CONFIG_FILE))
    }

    pub fn load(path: &Path) -> Result<Self, MappingError> {
        let content = fs::read_to_string(path)?;
        let config = toml::from_str(&content).map_err(|e| {
            MappingError::ConfigError(format!("Failed to parse {}: {}", path.display(), e))
        })?;
        info!("Loaded launch configuration from {}", path.display());
        Ok(config)
    }

    /// Defaults when the file does not exist, an error when it is malformed
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, MappingError> {
        let path = match path.map(Path::to_path_buf).or_else(Self::default_path) {
            Some(path) => path,
            None => {
                warn!("Could not determine configuration directory, using defaults");
                return Ok(Self::default());
            }
        };
        if !path.exists() {
            debug!("{} does not exist, using defaults", path.display());
            return Ok(Self::default());
        }
        Self::load(&path)
    }

    /// Explicit `format`, else the target encoder's native format
    pub fn output_format(&self) -> OutputFormat {
        self.format
            .unwrap_or_else(|| self.target.create_encoder().output_format())
    }
}

fn default_database_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(CONFIG_DIR).join(DATABASE_FILE))
}
