use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

pub async fn run(
    title: &str,
    description: Option<&str>,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let ticket = ctx.service.create_ticket(title, description).await?;
    output(&ticket, flags.format, ctx.date_style())
}
