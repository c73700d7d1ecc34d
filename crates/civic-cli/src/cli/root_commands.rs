use clap::{Args, Subcommand};

use crate::cli::subcommands::{TechnicianCommands, TicketCommands};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Create the database and a project config template.
    Init(InitArgs),
    /// Tickets and their history.
    Ticket {
        #[command(subcommand)]
        action: TicketCommands,
    },
    /// Technician roster and availability.
    Technician {
        #[command(subcommand)]
        action: TechnicianCommands,
    },
    /// Assign a ticket through a department's queue.
    Assign(AssignArgs),
    /// Move every technician booked on one date to another.
    Reschedule(RescheduleArgs),
    /// Run a JSON tool request, e.g. '{"tool":"fetch_ticket_by_id","ticket_id":1}'.
    Call(CallArgs),
    /// Print the JSON Schema of an entity or reply type.
    Schema(SchemaArgs),
}

#[derive(Clone, Debug, Args)]
pub struct InitArgs {
    /// Overwrite an existing `.civic/config.toml`.
    #[arg(long)]
    pub force: bool,
}

#[derive(Clone, Debug, Args)]
pub struct AssignArgs {
    pub ticket_id: i64,
    /// Department name or alias (public_work, sanitation, civic, safety).
    #[arg(long)]
    pub department: String,
    /// YYYY-MM-DD; defaults to today.
    #[arg(long)]
    pub work_date: Option<String>,
}

#[derive(Clone, Debug, Args)]
pub struct RescheduleArgs {
    /// Current work date, YYYY-MM-DD.
    pub existing_date: String,
    /// Replacement work date, YYYY-MM-DD.
    pub new_date: String,
    #[arg(long)]
    pub reason: Option<String>,
}

#[derive(Clone, Debug, Args)]
pub struct CallArgs {
    /// Request JSON, or `-` to read it from stdin.
    pub request: String,
}

#[derive(Clone, Debug, Args)]
pub struct SchemaArgs {
    /// ticket, ticket-details, technician, availability, history,
    /// assignment-outcome, reschedule-outcome, tool-call, tool-reply
    pub type_name: String,
}
