//! Tool surface consumed by the orchestrating agent layer.
//!
//! Every operation here answers with a plain value (id, flag, record, or
//! message string). Failures are logged and folded into that value; nothing
//! propagates to the caller. [`ToolCall`] lets a JSON request select any of
//! them and receive a [`ToolReply`].

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use civic_core::dates::parse_iso_date;
use civic_core::entities::TicketDetails;
use civic_core::enums::{Department, TicketStatus};
use civic_core::errors::CoreError;
use civic_core::responses::ToolReply;

use crate::error::DatabaseError;
use crate::service::CivicService;

/// Returned when any caller-supplied date is not `YYYY-MM-DD`.
pub const DATE_MISMATCH_MESSAGE: &str =
    "Error: Date format mismatch. Expected YYYY-MM-DD for input dates.";

/// Render an error the way the message-returning tools report it.
fn error_message(err: &DatabaseError) -> String {
    match err {
        DatabaseError::Core(CoreError::Validation(_)) => DATE_MISMATCH_MESSAGE.to_string(),
        DatabaseError::Core(core) => format!("Error: {core}"),
        DatabaseError::Other(other) => format!("An unexpected error occurred: {other}"),
        storage => format!("Database error: {storage}"),
    }
}

fn log_failure(operation: &str, err: &DatabaseError) {
    if err.is_storage() {
        tracing::error!(operation, error = %err, "tool call failed");
    } else {
        tracing::warn!(operation, error = %err, "tool call refused");
    }
}

/// The six stable operations, bound to one service.
pub struct CivicTools<'a> {
    service: &'a CivicService,
}

impl CivicService {
    #[must_use]
    pub const fn tools(&self) -> CivicTools<'_> {
        CivicTools { service: self }
    }
}

impl CivicTools<'_> {
    /// New ticket id, or `None` if the ticket could not be stored.
    pub async fn create_ticket(&self, title: &str, description: Option<&str>) -> Option<i64> {
        match self.service.create_ticket(title, description).await {
            Ok(ticket) => Some(ticket.id),
            Err(e) => {
                log_failure("create_ticket", &e);
                None
            }
        }
    }

    /// `true` when the ticket existed and the move was allowed.
    pub async fn update_ticket_status(&self, ticket_id: i64, new_status: &str) -> bool {
        let status = match new_status.parse::<TicketStatus>() {
            Ok(status) => status,
            Err(e) => {
                log_failure("update_ticket_status", &DatabaseError::from(e));
                return false;
            }
        };
        match self.service.update_ticket_status(ticket_id, status).await {
            Ok(updated) => updated.is_some(),
            Err(e) => {
                log_failure("update_ticket_status", &e);
                false
            }
        }
    }

    pub async fn add_history_log(
        &self,
        ticket_id: i64,
        status_change: Option<&str>,
        log_message: Option<&str>,
        assigned_technician_id: Option<i64>,
    ) -> bool {
        self.service
            .add_history_log(ticket_id, status_change, log_message, assigned_technician_id)
            .await
            .unwrap_or_else(|e| {
                log_failure("add_history_log", &e);
                false
            })
    }

    pub async fn fetch_ticket_by_id(&self, ticket_id: i64) -> Option<TicketDetails> {
        self.service
            .fetch_ticket_by_id(ticket_id)
            .await
            .unwrap_or_else(|e| {
                log_failure("fetch_ticket_by_id", &e);
                None
            })
    }

    /// Assign through the named department's queue and describe the result.
    pub async fn assign_department_ticket(
        &self,
        department: &str,
        ticket_id: i64,
        work_date: Option<&str>,
    ) -> String {
        let department = match department.parse::<Department>() {
            Ok(department) => department,
            Err(e) => {
                let err = DatabaseError::from(e);
                log_failure("assign_department_ticket", &err);
                return format!("Error: {err}");
            }
        };
        let work_date = match work_date.map(|d| parse_iso_date(d, "work_date")).transpose() {
            Ok(date) => date,
            Err(e) => {
                let err = DatabaseError::from(e);
                log_failure("assign_department_ticket", &err);
                return error_message(&err);
            }
        };

        match self
            .service
            .assigner(department)
            .assign_department_ticket(ticket_id, work_date)
            .await
        {
            Ok(outcome) => outcome.message(),
            Err(e) => {
                log_failure("assign_department_ticket", &e);
                error_message(&e)
            }
        }
    }

    /// Move every technician booked on `existing_date` and describe the result.
    pub async fn reschedule_by_date(
        &self,
        existing_date: &str,
        new_date: &str,
        reason: Option<&str>,
    ) -> String {
        match self
            .service
            .reschedule_by_date(existing_date, new_date, reason)
            .await
        {
            Ok(outcome) => outcome.message(),
            Err(e) => {
                log_failure("reschedule_by_date", &e);
                error_message(&e)
            }
        }
    }

    /// Run a decoded tool request.
    pub async fn dispatch(&self, call: ToolCall) -> ToolReply {
        tracing::debug!(tool = call.name(), "dispatching tool call");
        let result = match call {
            ToolCall::CreateTicket { title, description } => {
                Value::from(self.create_ticket(&title, description.as_deref()).await)
            }
            ToolCall::UpdateTicketStatus {
                ticket_id,
                new_status,
            } => Value::from(self.update_ticket_status(ticket_id, &new_status).await),
            ToolCall::AddHistoryLog {
                ticket_id,
                status_change,
                log_message,
                assigned_technician_id,
            } => {
                let added = self
                    .add_history_log(
                        ticket_id,
                        status_change.as_deref(),
                        log_message.as_deref(),
                        assigned_technician_id,
                    )
                    .await;
                Value::from(added)
            }
            ToolCall::FetchTicketById { ticket_id } => {
                match serde_json::to_value(self.fetch_ticket_by_id(ticket_id).await) {
                    Ok(value) => value,
                    Err(e) => {
                        return ToolReply::Error {
                            message: format!("Failed to serialize ticket {ticket_id}: {e}"),
                        };
                    }
                }
            }
            ToolCall::AssignDepartmentTicket {
                department,
                ticket_id,
                work_date,
            } => Value::from(
                self.assign_department_ticket(&department, ticket_id, work_date.as_deref())
                    .await,
            ),
            ToolCall::RescheduleByDate {
                existing_date,
                new_date,
                reason,
            } => Value::from(
                self.reschedule_by_date(&existing_date, &new_date, reason.as_deref())
                    .await,
            ),
            ToolCall::Cancel { task_id } => {
                let err = CoreError::Unsupported(format!(
                    "cancellation of in-flight work is not supported (task {task_id})"
                ));
                tracing::warn!(%task_id, "cancel refused");
                return ToolReply::Error {
                    message: err.to_string(),
                };
            }
        };
        ToolReply::Ok { result }
    }
}

/// A JSON tool request, tagged by operation name.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(tag = "tool", rename_all = "snake_case")]
pub enum ToolCall {
    CreateTicket {
        title: String,
        description: Option<String>,
    },
    UpdateTicketStatus {
        ticket_id: i64,
        new_status: String,
    },
    AddHistoryLog {
        ticket_id: i64,
        status_change: Option<String>,
        log_message: Option<String>,
        assigned_technician_id: Option<i64>,
    },
    FetchTicketById {
        ticket_id: i64,
    },
    AssignDepartmentTicket {
        department: String,
        ticket_id: i64,
        work_date: Option<String>,
    },
    RescheduleByDate {
        existing_date: String,
        new_date: String,
        reason: Option<String>,
    },
    /// Always refused.
    Cancel {
        task_id: String,
    },
}

impl ToolCall {
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::CreateTicket { .. } => "create_ticket",
            Self::UpdateTicketStatus { .. } => "update_ticket_status",
            Self::AddHistoryLog { .. } => "add_history_log",
            Self::FetchTicketById { .. } => "fetch_ticket_by_id",
            Self::AssignDepartmentTicket { .. } => "assign_department_ticket",
            Self::RescheduleByDate { .. } => "reschedule_by_date",
            Self::Cancel { .. } => "cancel",
        }
    }
}
