use clap::Subcommand;

/// Technician roster commands.
#[derive(Clone, Debug, Subcommand)]
pub enum TechnicianCommands {
    /// Add a technician to a department.
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        department: String,
    },
    /// Record availability; `--technician` and `--date` pair up in order.
    Availability {
        #[arg(long, required = true)]
        technician: Vec<i64>,
        #[arg(long, required = true)]
        date: Vec<String>,
    },
    /// List technicians.
    List {
        #[arg(long)]
        department: Option<String>,
    },
    /// Free technicians with a window on the date, in queue order.
    Available {
        #[arg(long)]
        department: String,
        /// YYYY-MM-DD; defaults to today.
        #[arg(long)]
        date: Option<String>,
    },
}
