use civic_core::responses::RescheduleOutcome;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::RescheduleArgs;
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
struct RescheduleResponse {
    message: String,
    #[serde(flatten)]
    outcome: RescheduleOutcome,
}

/// Handle `civic reschedule`.
pub async fn handle(
    args: &RescheduleArgs,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let outcome = ctx
        .service
        .reschedule_by_date(&args.existing_date, &args.new_date, args.reason.as_deref())
        .await?;
    output(
        &RescheduleResponse {
            message: outcome.message(),
            outcome,
        },
        flags.format,
        ctx.date_style(),
    )
}
