//! # civic-db
//!
//! libSQL store for Civic Desk: tickets, technicians, availability windows,
//! and the append-only ticket history.
//!
//! Every operation checks out a short-lived [`DbConnection`] from the shared
//! [`CivicDb`] handle and drops it on every exit path. Multi-statement
//! mutations run inside one transaction; technician assignment takes the
//! write lock up front (`BEGIN IMMEDIATE`) and claims the technician with a
//! conditional update.

pub mod error;
pub mod helpers;
mod migrations;
pub mod repos;
pub mod service;
pub mod tools;

#[cfg(test)]
mod test_support;

use std::ops::Deref;
use std::sync::Arc;
use std::time::Duration;

use error::DatabaseError;
use libsql::Builder;
use tokio::sync::{Mutex, OwnedMutexGuard};

/// Busy timeout used when none is configured.
pub const DEFAULT_BUSY_TIMEOUT: Duration = Duration::from_secs(5);

const IN_MEMORY: &str = ":memory:";

/// Store handle owned by the process entry point.
///
/// File databases hand out a fresh connection per operation. An in-memory
/// database only exists inside the connection that created it, so that mode
/// lends out one shared connection to a single operation at a time; others
/// wait for the lease to be dropped.
pub struct CivicDb {
    db: libsql::Database,
    shared: Option<Arc<Mutex<libsql::Connection>>>,
    busy_timeout: Duration,
}

/// A connection checked out for one operation.
pub enum DbConnection {
    Owned(libsql::Connection),
    /// Lease on the in-memory connection, released on drop.
    Shared(OwnedMutexGuard<libsql::Connection>),
}

impl Deref for DbConnection {
    type Target = libsql::Connection;

    fn deref(&self) -> &libsql::Connection {
        match self {
            Self::Owned(conn) => conn,
            Self::Shared(guard) => guard,
        }
    }
}

impl CivicDb {
    /// Open a local database at the given path (or `":memory:"`).
    ///
    /// Runs migrations automatically on open.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened or
    /// migrations fail.
    pub async fn open_local(path: &str) -> Result<Self, DatabaseError> {
        Self::open_local_with(path, DEFAULT_BUSY_TIMEOUT).await
    }

    /// Open a local database with an explicit busy timeout.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened or
    /// migrations fail.
    pub async fn open_local_with(path: &str, busy_timeout: Duration) -> Result<Self, DatabaseError> {
        let db = Builder::new_local(path).build().await?;
        let first = db.connect()?;
        configure_connection(&first, busy_timeout).await?;

        let in_memory = path == IN_MEMORY;
        if !in_memory {
            // Readers keep going while a writer holds the lock.
            let mut rows = first.query("PRAGMA journal_mode = WAL", ()).await?;
            rows.next().await?;
        }

        let civic_db = Self {
            db,
            shared: in_memory.then(|| Arc::new(Mutex::new(first))),
            busy_timeout,
        };
        civic_db.run_migrations().await?;
        tracing::debug!(path, "database opened");
        Ok(civic_db)
    }

    /// Acquire a connection for one operation.
    ///
    /// In memory mode this waits until the previous lease is dropped, so a
    /// caller must not hold one lease while requesting another.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the connection cannot be opened or configured.
    pub async fn connect(&self) -> Result<DbConnection, DatabaseError> {
        if let Some(shared) = &self.shared {
            return Ok(DbConnection::Shared(Arc::clone(shared).lock_owned().await));
        }
        let conn = self.db.connect()?;
        configure_connection(&conn, self.busy_timeout).await?;
        Ok(DbConnection::Owned(conn))
    }

    #[must_use]
    pub const fn is_in_memory(&self) -> bool {
        self.shared.is_some()
    }
}

/// Per-connection settings (`SQLite` keeps these per connection).
async fn configure_connection(
    conn: &libsql::Connection,
    busy_timeout: Duration,
) -> Result<(), DatabaseError> {
    conn.execute("PRAGMA foreign_keys = ON", ())
        .await
        .map_err(|e| DatabaseError::Query(format!("PRAGMA foreign_keys: {e}")))?;
    conn.busy_timeout(busy_timeout)
        .map_err(|e| DatabaseError::Query(format!("busy_timeout: {e}")))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn table_exists(db: &CivicDb, table: &str) -> bool {
        let conn = db.connect().await.unwrap();
        let mut rows = conn
            .query(
                "SELECT name FROM sqlite_master WHERE type='table' AND name=?1",
                [table],
            )
            .await
            .unwrap();
        rows.next().await.unwrap().is_some()
    }

    #[tokio::test]
    async fn open_local_creates_schema() {
        let db = CivicDb::open_local(":memory:").await.unwrap();
        for table in ["tickets", "technicians", "technician_availability", "history"] {
            assert!(table_exists(&db, table).await, "table '{table}' should exist");
        }
        assert!(db.is_in_memory());
    }

    #[tokio::test]
    async fn idempotent_migrations() {
        let db = CivicDb::open_local(":memory:").await.unwrap();
        db.run_migrations().await.unwrap();
    }

    #[tokio::test]
    async fn file_database_hands_out_independent_connections() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("civic.db");
        let db = CivicDb::open_local(path.to_str().unwrap()).await.unwrap();
        assert!(!db.is_in_memory());

        let writer = db.connect().await.unwrap();
        writer
            .execute(
                "INSERT INTO technicians (name, department) VALUES ('Ana', 'Public Work')",
                (),
            )
            .await
            .unwrap();
        drop(writer);

        let reader = db.connect().await.unwrap();
        let mut rows = reader
            .query("SELECT COUNT(*) FROM technicians", ())
            .await
            .unwrap();
        let row = rows.next().await.unwrap().unwrap();
        assert_eq!(row.get::<i64>(0).unwrap(), 1);
    }

    #[tokio::test]
    async fn history_is_append_only() {
        let db = CivicDb::open_local(":memory:").await.unwrap();
        let conn = db.connect().await.unwrap();
        conn.execute(
            "INSERT INTO tickets (title, created_at, updated_at) VALUES ('t', '2025-01-01T00:00:00Z', '2025-01-01T00:00:00Z')",
            (),
        )
        .await
        .unwrap();
        conn.execute(
            "INSERT INTO history (ticket_id, log_message, timestamp) VALUES (1, 'Ticket created', '2025-01-01T00:00:00Z')",
            (),
        )
        .await
        .unwrap();

        let update = conn
            .execute("UPDATE history SET log_message = 'rewritten'", ())
            .await;
        assert!(update.is_err(), "history rows must not be updated");

        let delete = conn.execute("DELETE FROM history", ()).await;
        assert!(delete.is_err(), "history rows must not be deleted");

        let delete_ticket = conn.execute("DELETE FROM tickets", ()).await;
        assert!(delete_ticket.is_err(), "tickets must not be deleted");
    }

    #[tokio::test]
    async fn legacy_dates_are_normalized_on_open() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("legacy.db");
        let path = path.to_str().unwrap();

        {
            let db = CivicDb::open_local(path).await.unwrap();
            let conn = db.connect().await.unwrap();
            conn.execute_batch(
                "INSERT INTO technicians (name, department, assigned_work_date) VALUES ('Ana', 'Public Work', '01-06-2025');
                 INSERT INTO technician_availability (technician_id, available_date) VALUES (1, '02-06-2025');
                 INSERT INTO technician_availability (technician_id, available_date) VALUES (1, '2025-06-03');
                 INSERT INTO technician_availability (technician_id, available_date) VALUES (1, '03-06-2025');",
            )
            .await
            .unwrap();
        }

        let db = CivicDb::open_local(path).await.unwrap();
        let conn = db.connect().await.unwrap();

        let mut rows = conn
            .query("SELECT assigned_work_date FROM technicians WHERE id = 1", ())
            .await
            .unwrap();
        let row = rows.next().await.unwrap().unwrap();
        assert_eq!(row.get::<String>(0).unwrap(), "2025-06-01");

        let mut rows = conn
            .query(
                "SELECT available_date FROM technician_availability ORDER BY available_date",
                (),
            )
            .await
            .unwrap();
        let mut dates = Vec::new();
        while let Some(row) = rows.next().await.unwrap() {
            dates.push(row.get::<String>(0).unwrap());
        }
        assert_eq!(dates, vec!["2025-06-02", "2025-06-03"]);
    }
}
