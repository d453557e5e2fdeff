//! JSON, TOML and YAML settings files.
//!
//! Each loader parses into the format's own generic value first, then
//! converts to `serde_json::Value` entries. The top level must be a
//! mapping; its keys become settings keys as-is.

use crate::error::SettingsError;
use serde_json::Value;
use std::collections::BTreeMap;

pub fn parse_json(source: &str, text: &str) -> Result<BTreeMap<String, Value>, SettingsError> {
    let raw: Value = serde_json::from_str(text).map_err(|e| SettingsError::InvalidSource {
        name: source.to_string(),
        reason: format!("invalid JSON syntax: {e}"),
    })?;
    into_entries(source, raw)
}

pub fn parse_toml(source: &str, text: &str) -> Result<BTreeMap<String, Value>, SettingsError> {
    let raw: toml::Value = toml::from_str(text).map_err(|e| SettingsError::InvalidSource {
        name: source.to_string(),
        reason: format!("invalid TOML syntax: {e}"),
    })?;
    let converted = serde_json::to_value(raw).map_err(|e| SettingsError::InvalidSource {
        name: source.to_string(),
        reason: e.to_string(),
    })?;
    into_entries(source, converted)
}

pub fn parse_yaml(source: &str, text: &str) -> Result<BTreeMap<String, Value>, SettingsError> {
    let raw: serde_yaml::Value =
        serde_yaml::from_str(text).map_err(|e| SettingsError::InvalidSource {
            name: source.to_string(),
            reason: format!("invalid YAML syntax: {e}"),
        })?;
    // Non-string mapping keys fail the conversion and surface here.
    let converted = serde_json::to_value(raw).map_err(|e| SettingsError::InvalidSource {
        name: source.to_string(),
        reason: e.to_string(),
    })?;
    into_entries(source, converted)
}

fn into_entries(source: &str, value: Value) -> Result<BTreeMap<String, Value>, SettingsError> {
    match value {
        Value::Object(map) => Ok(map.into_iter().collect()),
        other => Err(SettingsError::InvalidSource {
            name: source.to_string(),
            reason: format!("expected a top-level mapping, found {}", value_kind(&other)),
        }),
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "a mapping",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn json_object_becomes_entries() {
        let entries = parse_json("s.json", r#"{"SIMPLE_STRING": "simple", "SIMPLE_INTEGER": 1}"#)
            .unwrap();
        assert_eq!(entries["SIMPLE_STRING"], "simple");
        assert_eq!(entries["SIMPLE_INTEGER"], 1);
    }

    #[test]
    fn json_nested_values_are_preserved() {
        let entries =
            parse_json("s.json", r#"{"COMPLEX_DICT": {"complex": "settings", "foo": "bar"}}"#)
                .unwrap();
        assert_eq!(entries["COMPLEX_DICT"], json!({"complex": "settings", "foo": "bar"}));
    }

    #[test]
    fn json_top_level_array_is_rejected() {
        let err = parse_json("s.json", r#"[1, 2, 3]"#).unwrap_err();
        assert!(err.to_string().contains("top-level mapping"));
    }

    #[test]
    fn json_syntax_error_is_reported() {
        let err = parse_json("s.json", "{ not json").unwrap_err();
        assert!(err.to_string().contains("s.json"));
    }

    #[test]
    fn toml_table_becomes_entries() {
        let entries = parse_toml(
            "s.toml",
            "SIMPLE_STRING = \"simple\"\nSIMPLE_INTEGER = 1\n\n[COMPLEX_DICT]\nfoo = \"bar\"\n",
        )
        .unwrap();
        assert_eq!(entries["SIMPLE_STRING"], "simple");
        assert_eq!(entries["SIMPLE_INTEGER"], 1);
        assert_eq!(entries["COMPLEX_DICT"], json!({"foo": "bar"}));
    }

    #[test]
    fn toml_syntax_error_is_reported() {
        let err = parse_toml("s.toml", "KEY = ").unwrap_err();
        assert!(err.to_string().contains("s.toml"));
    }

    #[test]
    fn yaml_mapping_becomes_entries() {
        let entries = parse_yaml(
            "s.yaml",
            "SIMPLE_STRING: simple\nSIMPLE_INTEGER: 1\nCOMPLEX_DICT:\n  foo: bar\n",
        )
        .unwrap();
        assert_eq!(entries["SIMPLE_STRING"], "simple");
        assert_eq!(entries["SIMPLE_INTEGER"], 1);
        assert_eq!(entries["COMPLEX_DICT"], json!({"foo": "bar"}));
    }

    #[test]
    fn yaml_top_level_scalar_is_rejected() {
        let err = parse_yaml("s.yaml", "just a string").unwrap_err();
        assert!(err.to_string().contains("top-level mapping"));
    }
}
