use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};

use crate::core::UnitState;
use crate::history::RecentFiles;

pub const CONFIG_FILE_NAME: &str = ".xcstoolrc.json";

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Overrides the recent-files location.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub history_file: Option<String>,
    #[serde(default = "default_record_history")]
    pub record_history: bool,
    /// State given to values copied between languages.
    #[serde(default = "default_copy_state")]
    pub copy_state: UnitState,
    #[serde(default)]
    pub overwrite_on_copy: bool,
}

fn default_record_history() -> bool {
    true
}

fn default_copy_state() -> UnitState {
    UnitState::NeedsReview
}

impl Default for Config {
    fn default() -> Self {
        Self {
            history_file: None,
            record_history: default_record_history(),
            copy_state: default_copy_state(),
            overwrite_on_copy: false,
        }
    }
}

impl Config {
    /// Validate configuration values.
    ///
    /// Returns an error if `historyFile` is empty or names a directory.
    pub fn validate(&self) -> Result<()> {
        if let Some(history_file) = &self.history_file {
            if history_file.trim().is_empty() {
                bail!("'historyFile' must not be empty");
            }
            if Path::new(history_file).is_dir() {
                bail!("'historyFile' must be a file, found directory: \"{}\"", history_file);
            }
        }
        Ok(())
    }

    /// Where the recent-files list lives, whether or not recording is enabled.
    pub fn history_path(&self) -> Option<PathBuf> {
        match &self.history_file {
            Some(path) => Some(PathBuf::from(path)),
            None => RecentFiles::default_location(),
        }
    }

    /// The recent-files list to record opened catalogs in, if enabled.
    pub fn recent_files(&self) -> Option<RecentFiles> {
        if !self.record_history {
            return None;
        }
        self.history_path().map(RecentFiles::new)
    }
}

pub fn default_config_json() -> Result<String> {
    let config = Config::default();
    serde_json::to_string_pretty(&config).context("Failed to generate default config.")
}

pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }
        if current.join(".git").exists() {
            return None;
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Result of loading configuration.
pub struct ConfigLoadResult {
    pub config: Config,
    /// True if config was loaded from a file, false if using defaults.
    pub from_file: bool,
}

pub fn load_config(start_dir: &Path) -> Result<ConfigLoadResult> {
    match find_config_file(start_dir) {
        Some(path) => {
            let content = fs::read_to_string(&path)?;
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?;
            config.validate()?;
            tracing::debug!(path = %path.display(), "Loaded config");
            Ok(ConfigLoadResult {
                config,
                from_file: true,
            })
        }
        None => Ok(ConfigLoadResult {
            config: Config::default(),
            from_file: false,
        }),
    }
}
