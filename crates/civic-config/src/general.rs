//! General application configuration.

use serde::{Deserialize, Serialize};

/// Default result limit.
const fn default_limit() -> u32 {
    20
}

fn default_log_level() -> String {
    "warn".to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeneralConfig {
    /// Default result limit for list commands.
    #[serde(default = "default_limit")]
    pub default_limit: u32,

    /// Log level used when `CIVIC_LOG` is unset and no verbosity flag is given.
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Display dates as `DD-MM-YYYY` in CLI output.
    #[serde(default)]
    pub legacy_dates: bool,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            default_limit: default_limit(),
            log_level: default_log_level(),
            legacy_dates: false,
        }
    }
}
