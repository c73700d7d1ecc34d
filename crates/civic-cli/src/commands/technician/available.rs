use crate::cli::GlobalFlags;
use crate::commands::shared::parse::{parse_date, parse_department};
use crate::context::AppContext;
use crate::output::output;

pub async fn run(
    department: &str,
    date: Option<&str>,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let assigner = ctx.service.assigner(parse_department(department)?);
    let technicians = match date {
        Some(raw) => assigner.available_on(parse_date(raw, "--date")?).await?,
        None => assigner.get_available_technicians().await?,
    };
    output(&technicians, flags.format, ctx.date_style())
}
