use anyhow::bail;
use civic_core::entities::{
    HistoryRecord, Technician, TechnicianAvailability, Ticket, TicketDetails,
};
use civic_core::responses::{AssignmentOutcome, RescheduleOutcome, ToolReply};
use civic_db::tools::ToolCall;
use schemars::schema_for;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::SchemaArgs;
use crate::output::{DateStyle, output};

/// Type names accepted by `civic schema`.
pub const SCHEMA_TYPES: [&str; 9] = [
    "ticket",
    "ticket-details",
    "technician",
    "availability",
    "history",
    "assignment-outcome",
    "reschedule-outcome",
    "tool-call",
    "tool-reply",
];

/// Handle `civic schema`.
pub fn handle(args: &SchemaArgs, flags: &GlobalFlags) -> anyhow::Result<()> {
    let schema = schema_value(&args.type_name)?;
    output(&schema, flags.format, DateStyle::Iso)
}

fn schema_value(type_name: &str) -> anyhow::Result<serde_json::Value> {
    let schema = match type_name.replace('_', "-").as_str() {
        "ticket" => schema_for!(Ticket),
        "ticket-details" => schema_for!(TicketDetails),
        "technician" => schema_for!(Technician),
        "availability" => schema_for!(TechnicianAvailability),
        "history" => schema_for!(HistoryRecord),
        "assignment-outcome" => schema_for!(AssignmentOutcome),
        "reschedule-outcome" => schema_for!(RescheduleOutcome),
        "tool-call" => schema_for!(ToolCall),
        "tool-reply" => schema_for!(ToolReply),
        other => bail!(
            "unknown schema type '{other}' (expected one of: {})",
            SCHEMA_TYPES.join(", ")
        ),
    };
    Ok(serde_json::to_value(schema)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_listed_type_has_a_schema() {
        for name in SCHEMA_TYPES {
            let schema = schema_value(name).expect("schema should render");
            assert!(schema.is_object(), "{name} schema should be an object");
        }
    }

    #[test]
    fn underscores_are_accepted() {
        assert!(schema_value("ticket_details").is_ok());
    }

    #[test]
    fn unknown_type_lists_choices() {
        let err = schema_value("invoice").expect_err("should fail");
        assert!(err.to_string().contains("tool-call"));
    }
}
