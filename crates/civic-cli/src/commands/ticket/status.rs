use civic_core::errors::CoreError;

use crate::cli::GlobalFlags;
use crate::commands::shared::parse::parse_status;
use crate::context::AppContext;
use crate::output::output;

pub async fn run(id: i64, status: &str, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let status = parse_status(status)?;
    let ticket = ctx
        .service
        .update_ticket_status(id, status)
        .await?
        .ok_or_else(|| CoreError::NotFound {
            entity_type: "ticket".into(),
            id: id.to_string(),
        })?;
    output(&ticket, flags.format, ctx.date_style())
}
