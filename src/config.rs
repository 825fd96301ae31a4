use anyhow::Context;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Optional per-directory overrides, read from the state file's directory.
pub const CONFIG_FILE: &str = "upload-resetter.toml";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub state_file: String,
    pub backup_suffix: String,
    pub counter_field: String,
    pub name_field: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            state_file: "torrents.fastresume".to_string(),
            backup_suffix: ".deluge-upload-resetter.bak".to_string(),
            counter_field: "total_uploaded".to_string(),
            name_field: "name".to_string(),
        }
    }
}

impl Config {
    /// Loads `upload-resetter.toml` from `dir`, or the defaults when absent.
    pub fn load(dir: &Path) -> anyhow::Result<Self> {
        let config_path = dir.join(CONFIG_FILE);
        if !config_path.exists() {
            return Ok(Self::default());
        }
        let contents = fs::read_to_string(&config_path)
            .with_context(|| format!("reading {}", config_path.display()))?;
        toml::from_str(&contents)
            .with_context(|| format!("parsing {}", config_path.display()))
    }

    pub fn state_path(&self, dir: &Path) -> PathBuf {
        dir.join(&self.state_file)
    }
}
