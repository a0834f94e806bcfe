//! Recently opened catalog files.
//!
//! Stored as a JSON array of absolute paths, most recent first. Paths are
//! de-duplicated case-insensitively when recorded. There is no size cap; the
//! list only shrinks through explicit removal or pruning.

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use tracing::{debug, warn};

pub const HISTORY_FILE_NAME: &str = ".xcstring-tool-file-history";

#[derive(Debug, Clone)]
pub struct RecentFiles {
    path: PathBuf,
}

impl RecentFiles {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `$HOME/.xcstring-tool-file-history`, if a home directory is known.
    pub fn default_location() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(HISTORY_FILE_NAME))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the list. A missing or unreadable file yields an empty list.
    pub fn load(&self) -> Vec<PathBuf> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "No file history yet");
            return Vec::new();
        }

        let parsed = fs::read_to_string(&self.path)
            .context("Failed to read file history")
            .and_then(|content| {
                serde_json::from_str::<Vec<PathBuf>>(&content)
                    .context("Failed to parse file history")
            });

        match parsed {
            Ok(files) => files,
            Err(e) => {
                warn!(path = %self.path.display(), "{:#}", e);
                Vec::new()
            }
        }
    }

    pub fn save(&self, files: &[PathBuf]) -> Result<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        let content = serde_json::to_string(files).context("Failed to serialize file history")?;
        fs::write(&self.path, content)
            .with_context(|| format!("Failed to write file: {}", self.path.display()))?;
        Ok(())
    }

    /// Move `file` to the front of the list.
    pub fn record(&self, file: &Path) -> Result<()> {
        let file = absolute(file);
        let mut files = self.load();
        files.retain(|existing| !same_path(existing, &file));
        files.insert(0, file);
        self.save(&files)
    }

    /// Remove `file` from the list. Returns whether it was present.
    pub fn remove(&self, file: &Path) -> Result<bool> {
        let file = absolute(file);
        let mut files = self.load();
        let before = files.len();
        files.retain(|existing| !same_path(existing, &file));
        if files.len() == before {
            return Ok(false);
        }
        self.save(&files)?;
        Ok(true)
    }

    /// Drop entries whose file no longer exists. Returns the number removed.
    pub fn prune_missing(&self) -> Result<usize> {
        let mut files = self.load();
        let before = files.len();
        files.retain(|file| file.exists());
        let removed = before - files.len();
        if removed > 0 {
            self.save(&files)?;
        }
        Ok(removed)
    }

    pub fn clear(&self) -> Result<()> {
        self.save(&[])
    }
}

fn absolute(file: &Path) -> PathBuf {
    std::path::absolute(file).unwrap_or_else(|_| file.to_path_buf())
}

fn same_path(a: &Path, b: &Path) -> bool {
    a.to_string_lossy().to_lowercase() == b.to_string_lossy().to_lowercase()
}
