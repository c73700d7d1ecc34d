use crate::cli::GlobalFlags;
use crate::cli::root_commands::Commands;
use crate::commands;
use crate::context::AppContext;

/// Dispatch a parsed command to the corresponding handler module.
pub async fn dispatch(command: Commands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match command {
        Commands::Ticket { action } => commands::ticket::handle(&action, ctx, flags).await,
        Commands::Technician { action } => commands::technician::handle(&action, ctx, flags).await,
        Commands::Assign(args) => commands::assign::handle(&args, ctx, flags).await,
        Commands::Reschedule(args) => commands::reschedule::handle(&args, ctx, flags).await,
        Commands::Call(args) => commands::call::handle(&args, ctx, flags).await,
        Commands::Init(_) | Commands::Schema(_) => {
            unreachable!("init/schema are pre-dispatched in main")
        }
    }
}
