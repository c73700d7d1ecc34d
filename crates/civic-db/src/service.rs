//! Service layer orchestrating ticket, roster, and scheduling mutations.
//!
//! `CivicService` wraps `CivicDb` (raw database access) plus the options that
//! shape behavior. All repo methods are implemented as `impl CivicService`.

use std::time::Duration;

use civic_config::CivicConfig;

use crate::CivicDb;
use crate::error::DatabaseError;

/// Knobs taken from configuration that change service behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServiceOptions {
    /// Append a history row for every ticket held by a rescheduled technician.
    pub audit_reschedules: bool,
    /// Row cap for list queries that do not specify one.
    pub default_limit: u32,
}

impl Default for ServiceOptions {
    fn default() -> Self {
        Self {
            audit_reschedules: true,
            default_limit: 20,
        }
    }
}

impl ServiceOptions {
    #[must_use]
    pub const fn from_config(config: &CivicConfig) -> Self {
        Self {
            audit_reschedules: config.schedule.audit_reschedules,
            default_limit: config.general.default_limit,
        }
    }
}

/// Orchestrates store mutations and their history entries.
///
/// Every multi-statement mutation follows this protocol:
/// 1. Open a connection and begin a transaction
/// 2. Execute SQL
/// 3. Append history rows (inside the transaction)
/// 4. Commit, or drop the transaction to roll back
pub struct CivicService {
    db: CivicDb,
    options: ServiceOptions,
}

impl CivicService {
    /// Create a new service wrapping a local database.
    ///
    /// # Arguments
    ///
    /// * `db_path`: path to the libSQL database file, or `":memory:"` for tests.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened.
    pub async fn new_local(db_path: &str, options: ServiceOptions) -> Result<Self, DatabaseError> {
        let db = CivicDb::open_local(db_path).await?;
        Ok(Self { db, options })
    }

    /// Open the database named by the config and apply its options.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened.
    pub async fn from_config(config: &CivicConfig) -> Result<Self, DatabaseError> {
        let db = CivicDb::open_local_with(
            &config.database.path,
            Duration::from_millis(config.database.busy_timeout_ms),
        )
        .await?;
        Ok(Self {
            db,
            options: ServiceOptions::from_config(config),
        })
    }

    /// Create from an existing `CivicDb` (for testing).
    #[must_use]
    pub const fn from_db(db: CivicDb, options: ServiceOptions) -> Self {
        Self { db, options }
    }

    /// Access the underlying database handle.
    #[must_use]
    pub const fn db(&self) -> &CivicDb {
        &self.db
    }

    #[must_use]
    pub const fn options(&self) -> &ServiceOptions {
        &self.options
    }
}
