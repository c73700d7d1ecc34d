//! Disaster rescheduling settings.

use serde::{Deserialize, Serialize};

const fn default_audit_reschedules() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ScheduleConfig {
    /// Append a history row for every rescheduled technician that holds a ticket.
    #[serde(default = "default_audit_reschedules")]
    pub audit_reschedules: bool,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            audit_reschedules: default_audit_reschedules(),
        }
    }
}
