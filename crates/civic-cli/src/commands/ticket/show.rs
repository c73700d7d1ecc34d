use anyhow::Context;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

pub async fn run(id: i64, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let details = ctx
        .service
        .fetch_ticket_by_id(id)
        .await?
        .with_context(|| format!("ticket {id} not found"))?;
    output(&details, flags.format, ctx.date_style())
}
