//! Ticket repository: creation, status transitions, detail fetch, listing.

use libsql::TransactionBehavior;

use civic_core::entities::{Ticket, TicketDetails};
use civic_core::enums::{StoredStatus, TicketStatus};
use civic_core::errors::CoreError;

use crate::error::DatabaseError;
use crate::helpers::{
    format_timestamp, get_opt_i64, get_opt_string, now, now_after, parse_datetime,
};
use crate::repos::history::{insert_history, load_history};
use crate::repos::technician::load_technician;
use crate::service::CivicService;

const SELECT_COLS: &str =
    "id, title, description, status, assigned_technician_id, created_at, updated_at";

const CREATED_MESSAGE: &str = "Ticket created";

fn row_to_ticket(row: &libsql::Row) -> Result<Ticket, DatabaseError> {
    Ok(Ticket {
        id: row.get(0)?,
        title: row.get(1)?,
        description: get_opt_string(row, 2)?,
        status: StoredStatus::from_stored(&row.get::<String>(3)?),
        assigned_technician_id: get_opt_i64(row, 4)?,
        created_at: parse_datetime(&row.get::<String>(5)?)?,
        updated_at: parse_datetime(&row.get::<String>(6)?)?,
    })
}

/// Filter criteria for ticket listings.
#[derive(Debug, Default)]
pub struct TicketFilter {
    pub status: Option<TicketStatus>,
    pub technician_id: Option<i64>,
    pub limit: Option<u32>,
}

async fn select_ticket(
    conn: &libsql::Connection,
    ticket_id: i64,
) -> Result<Option<Ticket>, DatabaseError> {
    let mut rows = conn
        .query(
            &format!("SELECT {SELECT_COLS} FROM tickets WHERE id = ?1"),
            [ticket_id],
        )
        .await?;
    match rows.next().await? {
        Some(row) => Ok(Some(row_to_ticket(&row)?)),
        None => Ok(None),
    }
}

impl CivicService {
    /// Create an `open` ticket and its "Ticket created" history row atomically.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if either INSERT fails; nothing is written then.
    pub async fn create_ticket(
        &self,
        title: &str,
        description: Option<&str>,
    ) -> Result<Ticket, DatabaseError> {
        let now = now();
        let ts = format_timestamp(now);

        let conn = self.db().connect().await?;
        let tx = conn.transaction().await?;
        tx.execute(
            "INSERT INTO tickets (title, description, status, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            libsql::params![
                title,
                description,
                TicketStatus::Open.as_str(),
                ts.as_str(),
                ts.as_str()
            ],
        )
        .await?;
        let id = tx.last_insert_rowid();
        insert_history(&tx, id, None, Some(CREATED_MESSAGE), None, &ts).await?;
        tx.commit().await?;

        tracing::debug!(ticket_id = id, "ticket created");
        Ok(Ticket {
            id,
            title: title.to_string(),
            description: description.map(String::from),
            status: TicketStatus::Open.into(),
            assigned_technician_id: None,
            created_at: now,
            updated_at: now,
        })
    }

    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails or the row cannot be parsed.
    pub async fn get_ticket(&self, ticket_id: i64) -> Result<Option<Ticket>, DatabaseError> {
        let conn = self.db().connect().await?;
        select_ticket(&conn, ticket_id).await
    }

    /// Move a ticket to `new_status`, stamping `updated_at` and appending one
    /// history row in the same transaction.
    ///
    /// Entering a terminal state releases the technician holding the ticket.
    /// Returns `None` when the ticket does not exist.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidTransition` (wrapped) when the state machine
    /// forbids the move, or `DatabaseError` if a statement fails.
    pub async fn update_ticket_status(
        &self,
        ticket_id: i64,
        new_status: TicketStatus,
    ) -> Result<Option<Ticket>, DatabaseError> {
        let conn = self.db().connect().await?;
        let tx = conn
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .await?;

        let current = {
            let mut rows = tx
                .query(
                    "SELECT status, assigned_technician_id, updated_at FROM tickets WHERE id = ?1",
                    [ticket_id],
                )
                .await?;
            match rows.next().await? {
                Some(row) => Some((
                    row.get::<String>(0)?,
                    get_opt_i64(&row, 1)?,
                    parse_datetime(&row.get::<String>(2)?)?,
                )),
                None => None,
            }
        };
        let Some((old_status, technician_id, previous_update)) = current else {
            tx.rollback().await?;
            tracing::warn!(ticket_id, "status update for unknown ticket");
            return Ok(None);
        };

        match StoredStatus::from_stored(&old_status) {
            StoredStatus::Known(old) if !old.can_transition_to(new_status) => {
                tx.rollback().await?;
                return Err(CoreError::InvalidTransition {
                    entity_type: "ticket".into(),
                    id: ticket_id.to_string(),
                    from: old.as_str().into(),
                    to: new_status.as_str().into(),
                }
                .into());
            }
            StoredStatus::Known(_) => {}
            StoredStatus::Legacy(_) => {
                tracing::warn!(ticket_id, status = %old_status, "leaving unrecognized status");
            }
        }

        let ts = format_timestamp(now_after(previous_update));
        tx.execute(
            "UPDATE tickets SET status = ?1, updated_at = ?2 WHERE id = ?3",
            libsql::params![new_status.as_str(), ts.as_str(), ticket_id],
        )
        .await?;

        let released = match technician_id {
            Some(tid) if new_status.releases_technician() => {
                tx.execute(
                    "UPDATE technicians SET assigned_ticket_id = NULL, assigned_work_date = NULL
                     WHERE assigned_ticket_id = ?1",
                    [ticket_id],
                )
                .await?;
                tx.execute(
                    "UPDATE tickets SET assigned_technician_id = NULL WHERE id = ?1",
                    [ticket_id],
                )
                .await?;
                Some(tid)
            }
            _ => None,
        };

        let status_change = format!("{old_status} -> {new_status}");
        let mut message = format!("Status changed to {new_status}");
        if let Some(tid) = released {
            message.push_str(&format!("; technician {tid} released"));
        }
        insert_history(
            &tx,
            ticket_id,
            Some(status_change.as_str()),
            Some(message.as_str()),
            released,
            &ts,
        )
        .await?;

        let updated = select_ticket(&tx, ticket_id).await?;
        tx.commit().await?;

        tracing::debug!(ticket_id, %status_change, "ticket status updated");
        Ok(updated)
    }

    /// A ticket with its full history and current technician.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if a query fails or a row cannot be parsed.
    pub async fn fetch_ticket_by_id(
        &self,
        ticket_id: i64,
    ) -> Result<Option<TicketDetails>, DatabaseError> {
        let conn = self.db().connect().await?;
        let Some(ticket) = select_ticket(&conn, ticket_id).await? else {
            return Ok(None);
        };

        let history = load_history(&conn, ticket_id).await?;

        let assigned_technician_info = match ticket.assigned_technician_id {
            Some(tid) => {
                let technician = load_technician(&conn, tid).await?;
                if technician.is_none() {
                    tracing::warn!(ticket_id, technician_id = tid, "assigned technician is missing");
                }
                technician.map(Into::into)
            }
            None => None,
        };

        Ok(Some(TicketDetails {
            ticket,
            history,
            assigned_technician_info,
        }))
    }

    /// Tickets matching the filter, newest first.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn list_tickets(&self, filter: &TicketFilter) -> Result<Vec<Ticket>, DatabaseError> {
        let mut conditions = Vec::new();
        let mut params: Vec<libsql::Value> = Vec::new();

        if let Some(status) = filter.status {
            params.push(libsql::Value::Text(status.as_str().to_string()));
            conditions.push(format!("status = ?{}", params.len()));
        }
        if let Some(tid) = filter.technician_id {
            params.push(libsql::Value::Integer(tid));
            conditions.push(format!("assigned_technician_id = ?{}", params.len()));
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };
        let limit = filter.limit.unwrap_or(self.options().default_limit);
        let sql = format!(
            "SELECT {SELECT_COLS} FROM tickets {where_clause} \
             ORDER BY created_at DESC, id DESC LIMIT {limit}"
        );

        let conn = self.db().connect().await?;
        let mut rows = conn.query(&sql, libsql::params_from_iter(params)).await?;
        let mut tickets = Vec::new();
        while let Some(row) = rows.next().await? {
            tickets.push(row_to_ticket(&row)?);
        }
        Ok(tickets)
    }
}
