use crate::cli::GlobalFlags;
use crate::commands::shared::parse::parse_department;
use crate::context::AppContext;
use crate::output::output;

pub async fn run(
    name: &str,
    department: &str,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let department = parse_department(department)?;
    let technician = ctx.service.add_technician(name, department).await?;
    output(&technician, flags.format, ctx.date_style())
}
