//! Disaster rescheduling: move every technician booked on one date to another.

use chrono::NaiveDate;
use libsql::TransactionBehavior;

use civic_core::dates::{format_iso, parse_iso_date};
use civic_core::responses::RescheduleOutcome;

use crate::error::DatabaseError;
use crate::helpers::{format_timestamp, now};
use crate::repos::history::insert_history;
use crate::service::CivicService;

impl CivicService {
    /// Parse both dates as `YYYY-MM-DD`, then [`Self::reschedule`].
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Validation` (wrapped) for a malformed date before
    /// anything is written, or `DatabaseError` if the update fails.
    pub async fn reschedule_by_date(
        &self,
        existing_date: &str,
        new_date: &str,
        reason: Option<&str>,
    ) -> Result<RescheduleOutcome, DatabaseError> {
        let existing = parse_iso_date(existing_date, "existing_date")?;
        let new = parse_iso_date(new_date, "new_date")?;
        self.reschedule(existing, new, reason).await
    }

    /// Move every technician whose work date is `existing_date` to `new_date`.
    ///
    /// `reason_to_reassign` is overwritten only when a non-empty reason is
    /// given. With `audit_reschedules` on, each moved technician who holds a
    /// ticket gets a history row on that ticket in the same transaction.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if a statement fails; nothing is written then.
    pub async fn reschedule(
        &self,
        existing_date: NaiveDate,
        new_date: NaiveDate,
        reason: Option<&str>,
    ) -> Result<RescheduleOutcome, DatabaseError> {
        let reason = reason.map(str::trim).filter(|r| !r.is_empty());
        let existing = format_iso(existing_date);
        let new = format_iso(new_date);

        let conn = self.db().connect().await?;
        let tx = conn
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .await?;

        let mut holders = Vec::new();
        if self.options().audit_reschedules {
            let mut rows = tx
                .query(
                    "SELECT id, assigned_ticket_id FROM technicians
                     WHERE assigned_work_date = ?1 AND assigned_ticket_id IS NOT NULL
                     ORDER BY id",
                    [existing.as_str()],
                )
                .await?;
            while let Some(row) = rows.next().await? {
                holders.push((row.get::<i64>(0)?, row.get::<i64>(1)?));
            }
        }

        let affected = tx
            .execute(
                "UPDATE technicians
                 SET assigned_work_date = ?1, reason_to_reassign = COALESCE(?2, reason_to_reassign)
                 WHERE assigned_work_date = ?3",
                libsql::params![new.as_str(), reason, existing.as_str()],
            )
            .await?;

        let ts = format_timestamp(now());
        for &(technician_id, ticket_id) in &holders {
            let mut message = format!("Work date moved from {existing} to {new}.");
            if let Some(reason) = reason {
                message.push_str(&format!(" Reason: {reason}"));
            }
            insert_history(
                &tx,
                ticket_id,
                None,
                Some(message.as_str()),
                Some(technician_id),
                &ts,
            )
            .await?;
        }
        tx.commit().await?;

        tracing::debug!(%existing, %new, affected, audited = holders.len(), "work dates rescheduled");
        Ok(RescheduleOutcome {
            existing_date,
            new_date,
            reason: reason.map(String::from),
            affected,
            history_entries: holders.len() as u64,
        })
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use civic_core::enums::Department;
    use civic_core::errors::CoreError;
    use pretty_assertions::assert_eq;

    use crate::error::DatabaseError;
    use crate::service::ServiceOptions;
    use crate::test_support::helpers::{seed_technician, test_service, test_service_with};

    fn june(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, day).unwrap()
    }

    #[tokio::test]
    async fn moves_exactly_the_matching_technicians() {
        let svc = test_service().await;
        let mut on_first = Vec::new();
        for name in ["A", "B", "C"] {
            let tech = seed_technician(&svc, name, Department::PublicWork).await;
            let ticket = svc.create_ticket(&format!("Job {name}"), None).await.unwrap();
            svc.assign_ticket_to_technician(ticket.id, tech.id, june(1))
                .await
                .unwrap();
            on_first.push(tech.id);
        }
        let other = seed_technician(&svc, "D", Department::PublicWork).await;
        let ticket = svc.create_ticket("Job D", None).await.unwrap();
        svc.assign_ticket_to_technician(ticket.id, other.id, june(2))
            .await
            .unwrap();

        let outcome = svc
            .reschedule_by_date("2025-06-01", "2025-06-05", Some("storm"))
            .await
            .unwrap();
        assert_eq!(outcome.affected, 3);
        assert_eq!(
            outcome.message(),
            "Successfully updated assigned work date from 2025-06-01 to 2025-06-05 for 3 technicians. Reason: storm"
        );

        for id in on_first {
            let tech = svc.get_technician(id).await.unwrap().unwrap();
            assert_eq!(tech.assigned_work_date, Some(june(5)));
            assert_eq!(tech.reason_to_reassign.as_deref(), Some("storm"));
        }
        let untouched = svc.get_technician(other.id).await.unwrap().unwrap();
        assert_eq!(untouched.assigned_work_date, Some(june(2)));
        assert_eq!(untouched.reason_to_reassign, None);
    }

    #[tokio::test]
    async fn audits_each_held_ticket() {
        let svc = test_service().await;
        let tech = seed_technician(&svc, "A", Department::PublicWork).await;
        let ticket = svc.create_ticket("Job", None).await.unwrap();
        svc.assign_ticket_to_technician(ticket.id, tech.id, june(1))
            .await
            .unwrap();

        let outcome = svc
            .reschedule_by_date("2025-06-01", "2025-06-03", Some("flood"))
            .await
            .unwrap();
        assert_eq!(outcome.history_entries, 1);

        let history = svc.get_history(ticket.id).await.unwrap();
        let last = history.last().unwrap();
        assert_eq!(
            last.entry.log_message.as_deref(),
            Some("Work date moved from 2025-06-01 to 2025-06-03. Reason: flood")
        );
        assert_eq!(last.entry.assigned_technician_id, Some(tech.id));
        assert_eq!(last.technician_assigned_work_date, Some(june(3)));
    }

    #[tokio::test]
    async fn audit_can_be_disabled() {
        let svc = test_service_with(ServiceOptions {
            audit_reschedules: false,
            ..ServiceOptions::default()
        })
        .await;
        let tech = seed_technician(&svc, "A", Department::PublicWork).await;
        let ticket = svc.create_ticket("Job", None).await.unwrap();
        svc.assign_ticket_to_technician(ticket.id, tech.id, june(1))
            .await
            .unwrap();

        let outcome = svc
            .reschedule_by_date("2025-06-01", "2025-06-03", None)
            .await
            .unwrap();
        assert_eq!(outcome.affected, 1);
        assert_eq!(outcome.history_entries, 0);
        assert_eq!(svc.get_history(ticket.id).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn missing_reason_keeps_previous_one() {
        let svc = test_service().await;
        let tech = seed_technician(&svc, "A", Department::PublicWork).await;
        let ticket = svc.create_ticket("Job", None).await.unwrap();
        svc.assign_ticket_to_technician(ticket.id, tech.id, june(1))
            .await
            .unwrap();
        svc.reschedule_by_date("2025-06-01", "2025-06-02", Some("storm"))
            .await
            .unwrap();

        let outcome = svc
            .reschedule_by_date("2025-06-02", "2025-06-04", Some("  "))
            .await
            .unwrap();
        assert_eq!(outcome.reason, None);
        assert_eq!(
            outcome.message(),
            "Successfully updated assigned work date from 2025-06-02 to 2025-06-04 for 1 technicians."
        );
        let tech = svc.get_technician(tech.id).await.unwrap().unwrap();
        assert_eq!(tech.reason_to_reassign.as_deref(), Some("storm"));
    }

    #[tokio::test]
    async fn no_matches_reports_zero() {
        let svc = test_service().await;
        let outcome = svc
            .reschedule_by_date("2025-06-01", "2025-06-05", None)
            .await
            .unwrap();
        assert_eq!(outcome.affected, 0);
        assert_eq!(
            outcome.message(),
            "No technicians found with assigned work date 2025-06-01 to update."
        );
    }

    #[tokio::test]
    async fn malformed_date_is_rejected() {
        let svc = test_service().await;
        let err = svc
            .reschedule_by_date("01-06-2025", "2025-06-05", None)
            .await
            .unwrap_err();
        assert!(matches!(err, DatabaseError::Core(CoreError::Validation(_))));
    }
}
