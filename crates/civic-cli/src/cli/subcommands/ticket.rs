use clap::Subcommand;

/// Ticket commands.
#[derive(Clone, Debug, Subcommand)]
pub enum TicketCommands {
    /// Create a ticket.
    Create {
        #[arg(long)]
        title: String,
        #[arg(long)]
        description: Option<String>,
    },
    /// Move a ticket to a new status.
    Status {
        id: i64,
        /// open, in_progress, on_hold, resolved, closed
        status: String,
    },
    /// Append a free-form history entry.
    Log {
        id: i64,
        #[arg(long)]
        message: Option<String>,
        #[arg(long)]
        status_change: Option<String>,
        #[arg(long)]
        technician: Option<i64>,
    },
    /// Show a ticket with history and technician.
    Show { id: i64 },
    /// List tickets, newest first.
    List {
        #[arg(long)]
        status: Option<String>,
        #[arg(long)]
        technician: Option<i64>,
    },
}
