use chrono::{DateTime, NaiveDate, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::Department;

/// An append-only audit entry attached to a ticket.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct HistoryEntry {
    pub id: i64,
    pub ticket_id: i64,
    /// `"<old> -> <new>"` for status transitions.
    pub status_change: Option<String>,
    pub log_message: Option<String>,
    pub assigned_technician_id: Option<i64>,
    pub timestamp: DateTime<Utc>,
}

/// A history entry enriched with the referenced technician's current fields.
///
/// The technician columns come from a LEFT JOIN, so they are all `None` when
/// the entry has no technician or the technician row is gone.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct HistoryRecord {
    #[serde(flatten)]
    pub entry: HistoryEntry,
    pub technician_name: Option<String>,
    pub technician_department: Option<Department>,
    pub technician_assigned_work_date: Option<NaiveDate>,
    pub technician_reason_to_reassign: Option<String>,
}
