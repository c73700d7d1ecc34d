use chrono::NaiveDate;
use civic_core::dates::{ISO_FORMAT, format_legacy};
use serde::Serialize;
use serde_json::Value;

use crate::cli::OutputFormat;

/// How calendar dates are shown to the operator.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum DateStyle {
    /// `YYYY-MM-DD`, as stored.
    Iso,
    /// `DD-MM-YYYY`, for offices still reading the old format.
    Legacy,
}

/// Render a serializable response to a string in the requested format.
pub fn render<T: Serialize>(
    value: &T,
    format: OutputFormat,
    dates: DateStyle,
) -> anyhow::Result<String> {
    let mut value = serde_json::to_value(value)?;
    if dates == DateStyle::Legacy {
        legacy_dates(&mut value);
    }
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&value)?),
        OutputFormat::Raw => Ok(match value {
            Value::String(s) => s,
            other => serde_json::to_string(&other)?,
        }),
    }
}

/// Print a serializable response in the requested format.
pub fn output<T: Serialize>(value: &T, format: OutputFormat, dates: DateStyle) -> anyhow::Result<()> {
    let rendered = render(value, format, dates)?;
    println!("{rendered}");
    Ok(())
}

/// Rewrite ISO dates under any key ending in `date` as `DD-MM-YYYY`.
fn legacy_dates(value: &mut Value) {
    match value {
        Value::Object(map) => {
            for (key, field) in map.iter_mut() {
                if key.ends_with("date") {
                    if let Value::String(s) = field {
                        if let Ok(date) = NaiveDate::parse_from_str(s, ISO_FORMAT) {
                            *s = format_legacy(date);
                        }
                    }
                } else {
                    legacy_dates(field);
                }
            }
        }
        Value::Array(items) => items.iter_mut().for_each(legacy_dates),
        _ => {}
    }
}
