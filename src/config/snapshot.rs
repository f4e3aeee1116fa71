//! Snapshot configuration module.
//!
//! This module defines how trie snapshots are named and written.

use super::{ConfigResult, Validate};
use crate::error::config::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Snapshot configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotConfig {
    /// Extension appended to the compressed output path when no explicit
    /// snapshot path is given
    pub extension: String,

    /// Whether to pretty-print the JSON snapshot
    pub pretty: bool,
}

impl Default for SnapshotConfig {
    fn default() -> Self {
        Self {
            extension: "trie".to_string(),
            pretty: false,
        }
    }
}

impl SnapshotConfig {
    /// Default snapshot location for a compressed output file:
    /// `out.txt` becomes `out.txt.trie`.
    pub fn default_path_for(&self, output: &Path) -> PathBuf {
        let mut name = output.as_os_str().to_os_string();
        name.push(".");
        name.push(&self.extension);
        PathBuf::from(name)
    }
}

impl Validate for SnapshotConfig {
    fn validate(&self) -> ConfigResult<()> {
        if self.extension.is_empty() {
            return Err(ConfigError::ValidationError(
                "snapshot extension must not be empty".to_string(),
            ));
        }

        if self.extension.starts_with('.') || self.extension.contains(['/', '\\']) {
            return Err(ConfigError::ValidationError(format!(
                "Invalid snapshot extension: {}",
                self.extension
            )));
        }

        Ok(())
    }
}
