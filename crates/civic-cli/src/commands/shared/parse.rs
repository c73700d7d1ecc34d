use chrono::NaiveDate;
use civic_core::dates::parse_iso_date;
use civic_core::enums::{Department, TicketStatus};

/// Parse a department name or alias from the command line.
pub fn parse_department(raw: &str) -> anyhow::Result<Department> {
    raw.parse::<Department>()
        .map_err(|error| anyhow::anyhow!("invalid department '{raw}': {error}"))
}

pub fn parse_status(raw: &str) -> anyhow::Result<TicketStatus> {
    raw.parse::<TicketStatus>()
        .map_err(|error| anyhow::anyhow!("invalid status '{raw}': {error}"))
}

/// Parse a `YYYY-MM-DD` argument, naming the flag in the error.
pub fn parse_date(raw: &str, field: &str) -> anyhow::Result<NaiveDate> {
    parse_iso_date(raw, field).map_err(|error| anyhow::anyhow!("invalid {field}: {error}"))
}
