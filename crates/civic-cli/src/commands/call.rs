use std::io::Read;

use anyhow::Context;
use civic_db::tools::ToolCall;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::CallArgs;
use crate::context::AppContext;
use crate::output::output;

/// Handle `civic call`.
pub async fn handle(args: &CallArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let request = if args.request == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("failed to read tool request from stdin")?;
        buf
    } else {
        args.request.clone()
    };

    let call = parse_call(&request)?;
    let reply = ctx.service.tools().dispatch(call).await;
    output(&reply, flags.format, ctx.date_style())
}

fn parse_call(request: &str) -> anyhow::Result<ToolCall> {
    serde_json::from_str(request).context("invalid tool request")
}

#[cfg(test)]
mod tests {
    use super::parse_call;
    use civic_db::tools::ToolCall;

    #[test]
    fn parses_tagged_request() {
        let call = parse_call(r#"{"tool":"reschedule_by_date","existing_date":"2025-06-01","new_date":"2025-06-05"}"#)
            .expect("request should parse");
        assert_eq!(
            call,
            ToolCall::RescheduleByDate {
                existing_date: "2025-06-01".into(),
                new_date: "2025-06-05".into(),
                reason: None,
            }
        );
    }

    #[test]
    fn rejects_unknown_tool() {
        let err = parse_call(r#"{"tool":"drop_tables"}"#).expect_err("should fail");
        assert!(err.to_string().contains("invalid tool request"));
    }
}
