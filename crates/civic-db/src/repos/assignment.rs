//! Technician assignment, one queue per department.
//!
//! The only primitive is an atomic claim: inside a `BEGIN IMMEDIATE`
//! transaction the ticket is checked first, then the technician row is
//! updated only while it holds no ticket, and the affected-row count decides
//! who won. Two concurrent claims on the
//! same technician therefore produce exactly one success.

use chrono::NaiveDate;
use libsql::TransactionBehavior;

use civic_core::dates::{format_iso, today};
use civic_core::entities::AvailableTechnician;
use civic_core::enums::Department;
use civic_core::responses::AssignmentOutcome;

use crate::error::DatabaseError;
use crate::helpers::{format_timestamp, now};
use crate::repos::history::insert_history;
use crate::service::CivicService;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ClaimOutcome {
    Assigned,
    /// The technician already holds a ticket (or left the department).
    TechnicianUnavailable,
    /// The ticket is missing, already assigned, or terminal.
    TicketUnavailable,
}

/// Assignment queue for a single department.
pub struct DepartmentAssigner<'a> {
    service: &'a CivicService,
    department: Department,
}

impl CivicService {
    #[must_use]
    pub const fn assigner(&self, department: Department) -> DepartmentAssigner<'_> {
        DepartmentAssigner {
            service: self,
            department,
        }
    }

    /// Assign a ticket to a specific technician for `work_date`.
    ///
    /// Returns `false` when the technician already holds a ticket or the
    /// ticket cannot take a technician; nothing is written then.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if a statement fails.
    pub async fn assign_ticket_to_technician(
        &self,
        ticket_id: i64,
        technician_id: i64,
        work_date: NaiveDate,
    ) -> Result<bool, DatabaseError> {
        let outcome = self.claim(ticket_id, technician_id, None, work_date).await?;
        Ok(outcome == ClaimOutcome::Assigned)
    }

    async fn claim(
        &self,
        ticket_id: i64,
        technician_id: i64,
        department: Option<Department>,
        work_date: NaiveDate,
    ) -> Result<ClaimOutcome, DatabaseError> {
        let date = format_iso(work_date);
        let ts = format_timestamp(now());

        let conn = self.db().connect().await?;
        let tx = conn
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .await?;

        let ticket_open = {
            let mut rows = tx
                .query(
                    "SELECT 1 FROM tickets
                     WHERE id = ?1 AND assigned_technician_id IS NULL
                       AND status NOT IN ('resolved', 'closed')",
                    [ticket_id],
                )
                .await?;
            rows.next().await?.is_some()
        };
        if !ticket_open {
            tx.rollback().await?;
            tracing::warn!(ticket_id, technician_id, "ticket cannot take a technician");
            return Ok(ClaimOutcome::TicketUnavailable);
        }

        let claimed = tx
            .execute(
                "UPDATE technicians SET assigned_ticket_id = ?1, assigned_work_date = ?2
                 WHERE id = ?3 AND assigned_ticket_id IS NULL
                   AND (?4 IS NULL OR department = ?4)",
                libsql::params![
                    ticket_id,
                    date.as_str(),
                    technician_id,
                    department.map(Department::as_str)
                ],
            )
            .await?;
        if claimed == 0 {
            tx.rollback().await?;
            tracing::warn!(ticket_id, technician_id, "technician claim refused");
            return Ok(ClaimOutcome::TechnicianUnavailable);
        }

        tx.execute(
            "UPDATE tickets SET assigned_technician_id = ?1, updated_at = MAX(updated_at, ?2)
             WHERE id = ?3",
            libsql::params![technician_id, ts.as_str(), ticket_id],
        )
        .await?;

        let message = format!("Assigned to technician {technician_id} for {date}.");
        insert_history(
            &tx,
            ticket_id,
            None,
            Some(message.as_str()),
            Some(technician_id),
            &ts,
        )
        .await?;
        tx.commit().await?;

        tracing::debug!(ticket_id, technician_id, work_date = %date, "ticket assigned");
        Ok(ClaimOutcome::Assigned)
    }
}

impl DepartmentAssigner<'_> {
    #[must_use]
    pub const fn department(&self) -> Department {
        self.department
    }

    /// Free technicians with an availability window today, in queue order.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn get_available_technicians(
        &self,
    ) -> Result<Vec<AvailableTechnician>, DatabaseError> {
        self.available_on(today()).await
    }

    /// Free technicians with an availability window on `date`, by id.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn available_on(
        &self,
        date: NaiveDate,
    ) -> Result<Vec<AvailableTechnician>, DatabaseError> {
        let conn = self.service.db().connect().await?;
        let mut rows = conn
            .query(
                "SELECT t.id, t.name FROM technicians t
                 WHERE t.department = ?1 AND t.assigned_ticket_id IS NULL
                   AND EXISTS (
                       SELECT 1 FROM technician_availability a
                       WHERE a.technician_id = t.id AND a.available_date = ?2
                   )
                 ORDER BY t.id",
                libsql::params![self.department.as_str(), format_iso(date)],
            )
            .await?;

        let mut technicians = Vec::new();
        while let Some(row) = rows.next().await? {
            technicians.push(AvailableTechnician {
                id: row.get(0)?,
                name: row.get(1)?,
            });
        }
        Ok(technicians)
    }

    /// Assign the ticket to the first technician available today who can
    /// still be claimed. `work_date` defaults to today.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if a query or claim fails.
    pub async fn assign_department_ticket(
        &self,
        ticket_id: i64,
        work_date: Option<NaiveDate>,
    ) -> Result<AssignmentOutcome, DatabaseError> {
        let work_date = work_date.unwrap_or_else(today);
        let candidates = self.get_available_technicians().await?;

        for candidate in candidates {
            let outcome = self
                .service
                .claim(ticket_id, candidate.id, Some(self.department), work_date)
                .await?;
            match outcome {
                ClaimOutcome::Assigned => {
                    return Ok(AssignmentOutcome::Assigned {
                        ticket_id,
                        technician_id: candidate.id,
                        technician_name: candidate.name,
                        work_date,
                    });
                }
                ClaimOutcome::TechnicianUnavailable => {}
                ClaimOutcome::TicketUnavailable => {
                    return Ok(AssignmentOutcome::Failed {
                        ticket_id,
                        technician_name: candidate.name,
                    });
                }
            }
        }

        Ok(AssignmentOutcome::NoneAvailable {
            department: self.department,
        })
    }
}
