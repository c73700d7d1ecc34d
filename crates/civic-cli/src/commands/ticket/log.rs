use anyhow::bail;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
struct LogResponse {
    ticket_id: i64,
    logged: bool,
}

pub async fn run(
    id: i64,
    status_change: Option<&str>,
    message: Option<&str>,
    technician: Option<i64>,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    if status_change.is_none() && message.is_none() {
        bail!("ticket log needs --message or --status-change");
    }
    let logged = ctx
        .service
        .add_history_log(id, status_change, message, technician)
        .await?;
    if !logged {
        bail!("ticket {id} not found");
    }
    output(
        &LogResponse {
            ticket_id: id,
            logged,
        },
        flags.format,
        ctx.date_style(),
    )
}
