//! Roster repository: technicians and their dated availability windows.

use chrono::NaiveDate;

use civic_core::dates::format_iso;
use civic_core::entities::{Technician, TechnicianAvailability};
use civic_core::enums::Department;
use civic_core::errors::CoreError;

use crate::error::DatabaseError;
use crate::helpers::{get_opt_i64, get_opt_string, parse_date, parse_department, parse_optional_date};
use crate::service::CivicService;

const SELECT_COLS: &str =
    "id, name, department, assigned_ticket_id, assigned_work_date, reason_to_reassign";

fn row_to_technician(row: &libsql::Row) -> Result<Technician, DatabaseError> {
    Ok(Technician {
        id: row.get(0)?,
        name: row.get(1)?,
        department: parse_department(&row.get::<String>(2)?)?,
        assigned_ticket_id: get_opt_i64(row, 3)?,
        assigned_work_date: parse_optional_date(get_opt_string(row, 4)?.as_deref())?,
        reason_to_reassign: get_opt_string(row, 5)?,
    })
}

pub(crate) async fn load_technician(
    conn: &libsql::Connection,
    technician_id: i64,
) -> Result<Option<Technician>, DatabaseError> {
    let mut rows = conn
        .query(
            &format!("SELECT {SELECT_COLS} FROM technicians WHERE id = ?1"),
            [technician_id],
        )
        .await?;
    match rows.next().await? {
        Some(row) => Ok(Some(row_to_technician(&row)?)),
        None => Ok(None),
    }
}

async fn insert_availability(
    conn: &libsql::Connection,
    technician_id: i64,
    date: NaiveDate,
) -> Result<bool, DatabaseError> {
    let inserted = conn
        .execute(
            "INSERT OR IGNORE INTO technician_availability (technician_id, available_date)
             VALUES (?1, ?2)",
            libsql::params![technician_id, format_iso(date)],
        )
        .await?;
    Ok(inserted > 0)
}

fn technician_not_found(technician_id: i64) -> DatabaseError {
    CoreError::NotFound {
        entity_type: "technician".into(),
        id: technician_id.to_string(),
    }
    .into()
}

impl CivicService {
    /// # Errors
    ///
    /// Returns `DatabaseError` if the INSERT fails.
    pub async fn add_technician(
        &self,
        name: &str,
        department: Department,
    ) -> Result<Technician, DatabaseError> {
        let conn = self.db().connect().await?;
        conn.execute(
            "INSERT INTO technicians (name, department) VALUES (?1, ?2)",
            libsql::params![name, department.as_str()],
        )
        .await?;
        let id = conn.last_insert_rowid();
        tracing::debug!(technician_id = id, %department, "technician added");

        Ok(Technician {
            id,
            name: name.to_string(),
            department,
            assigned_ticket_id: None,
            assigned_work_date: None,
            reason_to_reassign: None,
        })
    }

    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails or the row cannot be parsed.
    pub async fn get_technician(
        &self,
        technician_id: i64,
    ) -> Result<Option<Technician>, DatabaseError> {
        let conn = self.db().connect().await?;
        load_technician(&conn, technician_id).await
    }

    /// All technicians, optionally restricted to one department, by id.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn list_technicians(
        &self,
        department: Option<Department>,
    ) -> Result<Vec<Technician>, DatabaseError> {
        let conn = self.db().connect().await?;
        let mut rows = match department {
            Some(dept) => {
                conn.query(
                    &format!("SELECT {SELECT_COLS} FROM technicians WHERE department = ?1 ORDER BY id"),
                    [dept.as_str()],
                )
                .await?
            }
            None => {
                conn.query(
                    &format!("SELECT {SELECT_COLS} FROM technicians ORDER BY id"),
                    (),
                )
                .await?
            }
        };

        let mut technicians = Vec::new();
        while let Some(row) = rows.next().await? {
            technicians.push(row_to_technician(&row)?);
        }
        Ok(technicians)
    }

    /// Record that a technician can work on `date`.
    ///
    /// Returns `false` if the window was already recorded.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::NotFound` (wrapped) for an unknown technician, or
    /// `DatabaseError` if a statement fails.
    pub async fn add_availability(
        &self,
        technician_id: i64,
        date: NaiveDate,
    ) -> Result<bool, DatabaseError> {
        let conn = self.db().connect().await?;
        if load_technician(&conn, technician_id).await?.is_none() {
            return Err(technician_not_found(technician_id));
        }
        insert_availability(&conn, technician_id, date).await
    }

    /// Record availability for paired `(technician, date)` lists in one
    /// transaction. Returns the number of new windows.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Validation` (wrapped) when the lists differ in
    /// length, before anything is written. An unknown technician rolls the
    /// whole batch back with `CoreError::NotFound`.
    pub async fn add_availability_bulk(
        &self,
        technician_ids: &[i64],
        dates: &[NaiveDate],
    ) -> Result<u64, DatabaseError> {
        if technician_ids.len() != dates.len() {
            return Err(CoreError::Validation(format!(
                "technician list has {} entries but date list has {}",
                technician_ids.len(),
                dates.len()
            ))
            .into());
        }

        let conn = self.db().connect().await?;
        let tx = conn.transaction().await?;
        let mut inserted = 0;
        for (&technician_id, &date) in technician_ids.iter().zip(dates) {
            if load_technician(&tx, technician_id).await?.is_none() {
                tx.rollback().await?;
                return Err(technician_not_found(technician_id));
            }
            if insert_availability(&tx, technician_id, date).await? {
                inserted += 1;
            }
        }
        tx.commit().await?;

        tracing::debug!(inserted, requested = dates.len(), "availability recorded");
        Ok(inserted)
    }

    /// Availability windows for one technician, earliest first.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails or a stored date is not ISO.
    pub async fn list_availability(
        &self,
        technician_id: i64,
    ) -> Result<Vec<TechnicianAvailability>, DatabaseError> {
        let conn = self.db().connect().await?;
        let mut rows = conn
            .query(
                "SELECT technician_id, available_date FROM technician_availability
                 WHERE technician_id = ?1 ORDER BY available_date",
                [technician_id],
            )
            .await?;

        let mut windows = Vec::new();
        while let Some(row) = rows.next().await? {
            windows.push(TechnicianAvailability {
                technician_id: row.get(0)?,
                available_date: parse_date(&row.get::<String>(1)?)?,
            });
        }
        Ok(windows)
    }
}
