use crate::cli::GlobalFlags;
use crate::commands::shared::parse::parse_department;
use crate::context::AppContext;
use crate::output::output;

pub async fn run(
    department: Option<&str>,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let department = department.map(parse_department).transpose()?;
    let technicians = ctx.service.list_technicians(department).await?;
    output(&technicians, flags.format, ctx.date_style())
}
