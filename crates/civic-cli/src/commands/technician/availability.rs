use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::commands::shared::parse::parse_date;
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
struct AvailabilityResponse {
    requested: usize,
    added: u64,
}

pub async fn run(
    technicians: &[i64],
    dates: &[String],
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let dates = dates
        .iter()
        .map(|raw| parse_date(raw, "--date"))
        .collect::<anyhow::Result<Vec<_>>>()?;
    let added = ctx.service.add_availability_bulk(technicians, &dates).await?;
    output(
        &AvailabilityResponse {
            requested: dates.len(),
            added,
        },
        flags.format,
        ctx.date_style(),
    )
}
