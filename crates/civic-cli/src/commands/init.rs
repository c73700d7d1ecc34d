use std::path::{Path, PathBuf};

use anyhow::Context;
use civic_config::CivicConfig;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::InitArgs;
use crate::context::AppContext;
use crate::output::output;

const PROJECT_DIR: &str = ".civic";

const CONFIG_TEMPLATE: &str = r#"# Civic Desk project configuration.
# Environment variables override these values: CIVIC_DATABASE__PATH, CIVIC_GENERAL__LEGACY_DATES, ...

[database]
path = ".civic/civic.db"
busy_timeout_ms = 5000

[schedule]
# Append a history entry to each ticket whose technician is rescheduled.
audit_reschedules = true

[general]
default_limit = 20
log_level = "warn"
# Show dates as DD-MM-YYYY in command output.
legacy_dates = false
"#;

#[derive(Debug, Serialize)]
struct InitResponse {
    database: String,
    config: PathBuf,
    config_written: bool,
}

/// Handle `civic init`.
pub async fn handle(args: &InitArgs, config: CivicConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    let config_path = Path::new(PROJECT_DIR).join("config.toml");
    let config_written = write_template(&config_path, args.force)?;

    let ctx = AppContext::init(config).await?;
    tracing::debug!(database = %ctx.config.database.path, "database initialized");

    output(
        &InitResponse {
            database: ctx.config.database.path.clone(),
            config: config_path,
            config_written,
        },
        flags.format,
        ctx.date_style(),
    )
}

/// Write the config template unless one exists. Returns whether it was written.
fn write_template(path: &Path, force: bool) -> anyhow::Result<bool> {
    if path.exists() && !force {
        return Ok(false);
    }
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("failed to create {}", dir.display()))?;
    }
    std::fs::write(path, CONFIG_TEMPLATE)
        .with_context(|| format!("failed to write {}", path.display()))?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn template_is_written_once_unless_forced() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join(".civic").join("config.toml");

        assert!(write_template(&path, false).unwrap());
        std::fs::write(&path, "# edited").unwrap();
        assert!(!write_template(&path, false).unwrap());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "# edited");

        assert!(write_template(&path, true).unwrap());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), CONFIG_TEMPLATE);
    }

    #[test]
    fn template_matches_defaults() {
        let defaults = CivicConfig::default();
        assert!(CONFIG_TEMPLATE.contains(&format!("path = \"{}\"", defaults.database.path)));
        assert!(CONFIG_TEMPLATE.contains(&format!(
            "default_limit = {}",
            defaults.general.default_limit
        )));
    }
}
