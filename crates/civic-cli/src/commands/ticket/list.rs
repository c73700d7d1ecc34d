use civic_db::repos::ticket::TicketFilter;

use crate::cli::GlobalFlags;
use crate::commands::shared::parse::parse_status;
use crate::context::AppContext;
use crate::output::output;

pub async fn run(
    status: Option<&str>,
    technician: Option<i64>,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let filter = TicketFilter {
        status: status.map(parse_status).transpose()?,
        technician_id: technician,
        limit: Some(ctx.limit(flags.limit)),
    };
    let tickets = ctx.service.list_tickets(&filter).await?;
    output(&tickets, flags.format, ctx.date_style())
}
