//! History repository.
//!
//! Append-only audit rows attached to tickets. Reads LEFT JOIN the
//! technician table so each entry carries the technician's current fields.

use civic_core::entities::{HistoryEntry, HistoryRecord};

use crate::error::DatabaseError;
use crate::helpers::{
    format_timestamp, get_opt_i64, get_opt_string, now, parse_datetime, parse_department,
    parse_optional_date,
};
use crate::service::CivicService;

const RECORD_COLS: &str = "h.id, h.ticket_id, h.status_change, h.log_message, \
     h.assigned_technician_id, h.timestamp, \
     t.name, t.department, t.assigned_work_date, t.reason_to_reassign";

fn row_to_record(row: &libsql::Row) -> Result<HistoryRecord, DatabaseError> {
    Ok(HistoryRecord {
        entry: HistoryEntry {
            id: row.get(0)?,
            ticket_id: row.get(1)?,
            status_change: get_opt_string(row, 2)?,
            log_message: get_opt_string(row, 3)?,
            assigned_technician_id: get_opt_i64(row, 4)?,
            timestamp: parse_datetime(&row.get::<String>(5)?)?,
        },
        technician_name: get_opt_string(row, 6)?,
        technician_department: get_opt_string(row, 7)?
            .map(|d| parse_department(&d))
            .transpose()?,
        technician_assigned_work_date: parse_optional_date(get_opt_string(row, 8)?.as_deref())?,
        technician_reason_to_reassign: get_opt_string(row, 9)?,
    })
}

/// Append one history row on an open connection or transaction.
///
/// Callers that mutate a ticket pass their transaction so the entry commits
/// or rolls back with the change it describes.
pub(crate) async fn insert_history(
    conn: &libsql::Connection,
    ticket_id: i64,
    status_change: Option<&str>,
    log_message: Option<&str>,
    assigned_technician_id: Option<i64>,
    timestamp: &str,
) -> Result<i64, DatabaseError> {
    conn.execute(
        "INSERT INTO history (ticket_id, status_change, log_message, assigned_technician_id, timestamp)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        libsql::params![
            ticket_id,
            status_change,
            log_message,
            assigned_technician_id,
            timestamp
        ],
    )
    .await?;
    Ok(conn.last_insert_rowid())
}

impl CivicService {
    /// Append a free-form history row to an existing ticket.
    ///
    /// Returns `false` without writing when the ticket does not exist.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the lookup or INSERT fails.
    pub async fn add_history_log(
        &self,
        ticket_id: i64,
        status_change: Option<&str>,
        log_message: Option<&str>,
        assigned_technician_id: Option<i64>,
    ) -> Result<bool, DatabaseError> {
        let conn = self.db().connect().await?;
        let mut rows = conn
            .query("SELECT 1 FROM tickets WHERE id = ?1", [ticket_id])
            .await?;
        if rows.next().await?.is_none() {
            tracing::warn!(ticket_id, "history log for unknown ticket ignored");
            return Ok(false);
        }

        let id = insert_history(
            &conn,
            ticket_id,
            status_change,
            log_message,
            assigned_technician_id,
            &format_timestamp(now()),
        )
        .await?;
        tracing::debug!(ticket_id, history_id = id, "history appended");
        Ok(true)
    }

    /// All history for a ticket, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails or a row cannot be parsed.
    pub async fn get_history(&self, ticket_id: i64) -> Result<Vec<HistoryRecord>, DatabaseError> {
        let conn = self.db().connect().await?;
        load_history(&conn, ticket_id).await
    }
}

pub(crate) async fn load_history(
    conn: &libsql::Connection,
    ticket_id: i64,
) -> Result<Vec<HistoryRecord>, DatabaseError> {
    let mut rows = conn
        .query(
            &format!(
                "SELECT {RECORD_COLS} FROM history h \
                 LEFT JOIN technicians t ON t.id = h.assigned_technician_id \
                 WHERE h.ticket_id = ?1 \
                 ORDER BY h.timestamp ASC, h.id ASC"
            ),
            [ticket_id],
        )
        .await?;

    let mut records = Vec::new();
    while let Some(row) = rows.next().await? {
        records.push(row_to_record(&row)?);
    }
    Ok(records)
}
