use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_NAME: &str = "scalpel.config.json";

/// Scalpel configuration file format
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Undo steps kept per document (0 = unlimited)
    #[serde(default = "default_history_capacity")]
    pub history_capacity: usize,

    /// Write `<file>.bak` before overwriting a file
    #[serde(default)]
    pub backup: bool,
}

fn default_history_capacity() -> usize {
    100
}

impl Config {
    /// Load config from a directory
    pub fn load(cwd: &str) -> anyhow::Result<Self> {
        let config_path = PathBuf::from(cwd).join(DEFAULT_CONFIG_NAME);

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            // Return default config if none exists
            Ok(Config::default())
        }
    }

    /// Path of the backup written for `file`
    pub fn backup_path(file: &Path) -> PathBuf {
        let mut name = file.as_os_str().to_owned();
        name.push(".bak");
        PathBuf::from(name)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            history_capacity: default_history_capacity(),
            backup: false,
        }
    }
}
