mod add;
mod availability;
mod available;
mod list;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::TechnicianCommands;
use crate::context::AppContext;

/// Handle `civic technician`.
pub async fn handle(
    action: &TechnicianCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        TechnicianCommands::Add { name, department } => add::run(name, department, ctx, flags).await,
        TechnicianCommands::Availability { technician, date } => {
            availability::run(technician, date, ctx, flags).await
        }
        TechnicianCommands::List { department } => {
            list::run(department.as_deref(), ctx, flags).await
        }
        TechnicianCommands::Available { department, date } => {
            available::run(department, date.as_deref(), ctx, flags).await
        }
    }
}
