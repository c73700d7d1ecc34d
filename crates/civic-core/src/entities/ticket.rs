use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::entities::{HistoryRecord, TechnicianSnapshot};
use crate::enums::StoredStatus;

/// A reported city issue.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Ticket {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub status: StoredStatus,
    pub assigned_technician_id: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A ticket with its full history and the current technician, if any.
///
/// `assigned_technician_info` is `None` until a technician is assigned, and
/// also when the referenced technician row no longer exists.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct TicketDetails {
    #[serde(flatten)]
    pub ticket: Ticket,
    pub history: Vec<HistoryRecord>,
    pub assigned_technician_info: Option<TechnicianSnapshot>,
}
