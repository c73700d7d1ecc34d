use civic_core::responses::AssignmentOutcome;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::AssignArgs;
use crate::commands::shared::parse::{parse_date, parse_department};
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
struct AssignResponse {
    message: String,
    #[serde(flatten)]
    outcome: AssignmentOutcome,
}

/// Handle `civic assign`.
pub async fn handle(args: &AssignArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let department = parse_department(&args.department)?;
    let work_date = args
        .work_date
        .as_deref()
        .map(|raw| parse_date(raw, "--work-date"))
        .transpose()?;

    let outcome = ctx
        .service
        .assigner(department)
        .assign_department_ticket(args.ticket_id, work_date)
        .await?;
    output(
        &AssignResponse {
            message: outcome.message(),
            outcome,
        },
        flags.format,
        ctx.date_style(),
    )
}
