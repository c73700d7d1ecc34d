//! Integration tests for TOML and environment configuration loading.
//!
//! Uses `figment::Jail` for sandboxed file and env var manipulation.

use civic_config::CivicConfig;
use figment::{
    Figment, Jail,
    providers::{Env, Format, Serialized, Toml},
};
use pretty_assertions::assert_eq;

#[test]
fn loads_all_sections_from_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[database]
path = "/var/lib/civic/city_office.db"
busy_timeout_ms = 250

[schedule]
audit_reschedules = false

[general]
default_limit = 50
log_level = "debug"
legacy_dates = true
"#,
        )?;

        let figment = Figment::from(Serialized::defaults(CivicConfig::default()))
            .merge(Toml::file("config.toml"));
        let config = CivicConfig::from_figment(&figment).expect("config loads");

        assert_eq!(config.database.path, "/var/lib/civic/city_office.db");
        assert_eq!(config.database.busy_timeout_ms, 250);
        assert!(!config.schedule.audit_reschedules);
        assert_eq!(config.general.default_limit, 50);
        assert_eq!(config.general.log_level, "debug");
        assert!(config.general.legacy_dates);
        Ok(())
    });
}

#[test]
fn partial_toml_keeps_defaults() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[database]
path = "city.db"
"#,
        )?;

        let figment = Figment::from(Serialized::defaults(CivicConfig::default()))
            .merge(Toml::file("config.toml"));
        let config = CivicConfig::from_figment(&figment).expect("config loads");

        assert_eq!(config.database.path, "city.db");
        assert_eq!(config.database.busy_timeout_ms, 5000);
        assert!(config.schedule.audit_reschedules);
        Ok(())
    });
}

#[test]
fn env_overrides_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[database]
path = "from-toml.db"
"#,
        )?;
        jail.set_env("CIVIC_DATABASE__PATH", "from-env.db");
        jail.set_env("CIVIC_SCHEDULE__AUDIT_RESCHEDULES", "false");

        let figment = Figment::from(Serialized::defaults(CivicConfig::default()))
            .merge(Toml::file("config.toml"))
            .merge(Env::prefixed("CIVIC_").split("__"));
        let config = CivicConfig::from_figment(&figment).expect("config loads");

        assert_eq!(config.database.path, "from-env.db");
        assert!(!config.schedule.audit_reschedules);
        Ok(())
    });
}

#[test]
fn project_config_file_is_picked_up() {
    Jail::expect_with(|jail| {
        std::fs::create_dir_all(jail.directory().join(".civic")).map_err(|e| e.to_string())?;
        jail.create_file(
            ".civic/config.toml",
            r#"
[general]
default_limit = 7
"#,
        )?;

        let config = CivicConfig::load().expect("config loads");
        assert_eq!(config.general.default_limit, 7);
        Ok(())
    });
}

#[test]
fn invalid_limit_from_env_is_rejected() {
    Jail::expect_with(|jail| {
        jail.set_env("CIVIC_GENERAL__DEFAULT_LIMIT", "0");
        assert!(CivicConfig::load().is_err());
        Ok(())
    });
}
