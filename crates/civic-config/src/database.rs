//! Store location and connection settings.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

fn default_path() -> String {
    ".civic/civic.db".to_string()
}

/// Default busy timeout in milliseconds.
const fn default_busy_timeout_ms() -> u64 {
    5000
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    /// Path to the libSQL database file, or `":memory:"`.
    #[serde(default = "default_path")]
    pub path: String,

    /// How long a writer waits on a locked database before failing.
    #[serde(default = "default_busy_timeout_ms")]
    pub busy_timeout_ms: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_path(),
            busy_timeout_ms: default_busy_timeout_ms(),
        }
    }
}

impl DatabaseConfig {
    #[must_use]
    pub fn is_in_memory(&self) -> bool {
        self.path == ":memory:"
    }

    /// Parent directory that must exist before the database file is opened.
    #[must_use]
    pub fn parent_dir(&self) -> Option<PathBuf> {
        if self.is_in_memory() {
            return None;
        }
        PathBuf::from(&self.path)
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map(std::path::Path::to_path_buf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_correct() {
        let config = DatabaseConfig::default();
        assert_eq!(config.path, ".civic/civic.db");
        assert_eq!(config.busy_timeout_ms, 5000);
        assert!(!config.is_in_memory());
        assert_eq!(config.parent_dir(), Some(PathBuf::from(".civic")));
    }

    #[test]
    fn in_memory_has_no_parent() {
        let config = DatabaseConfig {
            path: ":memory:".into(),
            ..DatabaseConfig::default()
        };
        assert!(config.is_in_memory());
        assert!(config.parent_dir().is_none());
    }

    #[test]
    fn bare_file_name_has_no_parent() {
        let config = DatabaseConfig {
            path: "city_office.db".into(),
            ..DatabaseConfig::default()
        };
        assert!(config.parent_dir().is_none());
    }
}
