use anyhow::Context;
use civic_config::CivicConfig;
use civic_db::service::CivicService;

use crate::output::DateStyle;

/// Shared application resources initialized once at startup.
pub struct AppContext {
    pub service: CivicService,
    pub config: CivicConfig,
}

impl AppContext {
    /// Open the configured database, creating its directory when needed.
    pub async fn init(config: CivicConfig) -> anyhow::Result<Self> {
        if let Some(dir) = config.database.parent_dir() {
            std::fs::create_dir_all(&dir)
                .with_context(|| format!("failed to create database directory {}", dir.display()))?;
        }

        let service = CivicService::from_config(&config)
            .await
            .with_context(|| format!("failed to open database at {}", config.database.path))?;

        Ok(Self { service, config })
    }

    #[must_use]
    pub const fn date_style(&self) -> DateStyle {
        if self.config.general.legacy_dates {
            DateStyle::Legacy
        } else {
            DateStyle::Iso
        }
    }

    /// Row cap with precedence: global `--limit`, then config.
    #[must_use]
    pub fn limit(&self, flag: Option<u32>) -> u32 {
        flag.unwrap_or(self.config.general.default_limit)
    }
}
