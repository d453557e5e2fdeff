//! Shared CLI utilities.

use anyhow::Result;
use layered_settings::Settings;
use serde_json::Value;

/// Resolve settings from an explicit `--settings` list, or fall back
/// to the library's own resolution (process arguments, then the
/// `LAYERED_SETTINGS` environment variable).
pub fn resolve_settings(list: Option<&str>) -> Result<Settings> {
    let settings = match list {
        Some(list) => Settings::from_list(list)?,
        None => Settings::load()?,
    };
    Ok(settings)
}

/// Render a value for plain-text output: strings print bare, anything
/// else prints as compact JSON.
pub fn render_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
