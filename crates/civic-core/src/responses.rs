//! Outcome types returned to the orchestrating agent layer.
//!
//! Every tool ultimately answers with a human-readable string the agent can
//! relay verbatim. The structured outcomes below carry the data; `message()`
//! renders the string.

use chrono::NaiveDate;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::dates::format_iso;
use crate::enums::Department;

/// Result of `assign_department_ticket`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum AssignmentOutcome {
    Assigned {
        ticket_id: i64,
        technician_id: i64,
        technician_name: String,
        work_date: NaiveDate,
    },
    NoneAvailable {
        department: Department,
    },
    Failed {
        ticket_id: i64,
        technician_name: String,
    },
}

impl AssignmentOutcome {
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::Assigned {
                ticket_id,
                technician_id,
                technician_name,
                work_date,
            } => format!(
                "Ticket {ticket_id} successfully assigned to technician {technician_name} (ID: {technician_id}) for {}.",
                format_iso(*work_date)
            ),
            Self::NoneAvailable { department } => {
                format!("No available technicians found in the {department} department.")
            }
            Self::Failed {
                ticket_id,
                technician_name,
            } => format!("Failed to assign ticket {ticket_id} to technician {technician_name}."),
        }
    }
}

/// Result of a disaster reschedule.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct RescheduleOutcome {
    pub existing_date: NaiveDate,
    pub new_date: NaiveDate,
    pub reason: Option<String>,
    /// Technicians whose work date moved.
    pub affected: u64,
    /// History rows appended for technicians holding a ticket.
    pub history_entries: u64,
}

impl RescheduleOutcome {
    #[must_use]
    pub fn message(&self) -> String {
        let existing = format_iso(self.existing_date);
        if self.affected == 0 {
            return format!("No technicians found with assigned work date {existing} to update.");
        }
        let mut message = format!(
            "Successfully updated assigned work date from {existing} to {} for {} technicians.",
            format_iso(self.new_date),
            self.affected
        );
        if let Some(reason) = &self.reason {
            message.push_str(&format!(" Reason: {reason}"));
        }
        message
    }
}

/// JSON envelope returned by the tool dispatcher.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ToolReply {
    Ok { result: serde_json::Value },
    Error { message: String },
}
