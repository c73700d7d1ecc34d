use chrono::NaiveDate;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::Department;

/// A department worker holding at most one active ticket.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Technician {
    pub id: i64,
    pub name: String,
    pub department: Department,
    pub assigned_ticket_id: Option<i64>,
    pub assigned_work_date: Option<NaiveDate>,
    pub reason_to_reassign: Option<String>,
}

impl Technician {
    #[must_use]
    pub const fn is_assigned(&self) -> bool {
        self.assigned_ticket_id.is_some()
    }
}

/// Technician fields shown alongside a fetched ticket.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct TechnicianSnapshot {
    pub id: i64,
    pub name: String,
    pub department: Department,
    pub assigned_work_date: Option<NaiveDate>,
    pub reason_to_reassign: Option<String>,
}

impl From<Technician> for TechnicianSnapshot {
    fn from(t: Technician) -> Self {
        Self {
            id: t.id,
            name: t.name,
            department: t.department,
            assigned_work_date: t.assigned_work_date,
            reason_to_reassign: t.reason_to_reassign,
        }
    }
}

/// An entry in a department's assignment queue.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct AvailableTechnician {
    pub id: i64,
    pub name: String,
}

/// A dated availability window for a technician.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct TechnicianAvailability {
    pub technician_id: i64,
    pub available_date: NaiveDate,
}
