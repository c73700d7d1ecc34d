//! Database migration runner.
//!
//! Embeds the SQL migration files at compile time and executes them on
//! database open. All statements are idempotent for re-running.

use crate::CivicDb;
use crate::error::DatabaseError;

/// Initial schema: 4 tables, 5 indexes, 3 append-only triggers.
const MIGRATION_001: &str = include_str!("../migrations/001_initial.sql");
/// Legacy `DD-MM-YYYY` date normalization.
const MIGRATION_002: &str = include_str!("../migrations/002_legacy_dates.sql");

impl CivicDb {
    /// Run all embedded migrations in sequence.
    pub(crate) async fn run_migrations(&self) -> Result<(), DatabaseError> {
        let conn = self.connect().await?;
        conn.execute_batch(MIGRATION_001)
            .await
            .map_err(|e| DatabaseError::Migration(format!("001_initial: {e}")))?;
        conn.execute_batch(MIGRATION_002)
            .await
            .map_err(|e| DatabaseError::Migration(format!("002_legacy_dates: {e}")))?;
        Ok(())
    }
}
