mod create;
mod list;
mod log;
mod show;
mod status;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::TicketCommands;
use crate::context::AppContext;

/// Handle `civic ticket`.
pub async fn handle(
    action: &TicketCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        TicketCommands::Create { title, description } => {
            create::run(title, description.as_deref(), ctx, flags).await
        }
        TicketCommands::Status { id, status } => status::run(*id, status, ctx, flags).await,
        TicketCommands::Log {
            id,
            message,
            status_change,
            technician,
        } => {
            log::run(
                *id,
                status_change.as_deref(),
                message.as_deref(),
                *technician,
                ctx,
                flags,
            )
            .await
        }
        TicketCommands::Show { id } => show::run(*id, ctx, flags).await,
        TicketCommands::List { status, technician } => {
            list::run(status.as_deref(), *technician, ctx, flags).await
        }
    }
}
