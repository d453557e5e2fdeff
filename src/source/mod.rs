//! Settings sources: where the source list comes from and how each
//! identifier is loaded.
//!
//! The list of sources is read once, from `--settings=<list>` (or
//! `--settings <list>`) on the command line, falling back to the
//! `LAYERED_SETTINGS` environment variable. Each identifier is then
//! classified by shape: a recognized file extension selects a file
//! loader, anything that parses as a dotted name resolves against the
//! module registry.

pub mod cfg;
pub mod module;
pub mod structured;

pub use module::SettingsModule;

use crate::error::SettingsError;
use crate::utils::read_utf8;
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::Path;

/// Environment variable holding the comma-separated source list when
/// no `--settings` flag is present.
pub const SETTINGS_VAR: &str = "LAYERED_SETTINGS";

const SETTINGS_FLAG: &str = "--settings";

/// How a source identifier will be loaded.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum SourceKind {
    KeyValue,
    Json,
    Toml,
    Yaml,
    Module,
}

impl SourceKind {
    fn classify(source: &str) -> Result<Self, SettingsError> {
        if let Some(ext) = Path::new(source).extension().and_then(|e| e.to_str()) {
            match ext.to_ascii_lowercase().as_str() {
                "cfg" | "conf" => return Ok(Self::KeyValue),
                "json" => return Ok(Self::Json),
                "toml" => return Ok(Self::Toml),
                "yaml" | "yml" => return Ok(Self::Yaml),
                _ => {}
            }
        }
        if is_module_name(source) {
            return Ok(Self::Module);
        }
        Err(SettingsError::UnsupportedSource { name: source.to_string() })
    }
}

/// Dotted names are module identifiers: non-empty dot-separated
/// segments of ASCII alphanumerics and underscores.
fn is_module_name(source: &str) -> bool {
    !source.is_empty()
        && source.split('.').all(|segment| {
            !segment.is_empty()
                && segment.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
        })
}

/// Load one source identifier into its settings entries.
pub(crate) fn load(source: &str) -> Result<BTreeMap<String, Value>, SettingsError> {
    let kind = SourceKind::classify(source)?;
    tracing::debug!(source, kind = ?kind, "loading settings source");
    match kind {
        SourceKind::Module => module::load(source),
        SourceKind::KeyValue => Ok(cfg::parse(&read_source_file(source)?)),
        SourceKind::Json => structured::parse_json(source, &read_source_file(source)?),
        SourceKind::Toml => structured::parse_toml(source, &read_source_file(source)?),
        SourceKind::Yaml => structured::parse_yaml(source, &read_source_file(source)?),
    }
}

fn read_source_file(source: &str) -> Result<String, SettingsError> {
    let path = Path::new(source);
    if !path.is_file() {
        return Err(SettingsError::SourceNotFound { name: source.to_string() });
    }
    read_utf8(path).map_err(|e| SettingsError::InvalidSource {
        name: source.to_string(),
        reason: e.to_string(),
    })
}

/// Resolve the source list from an argv iterator and an environment
/// lookup. A present flag is authoritative: its value never falls back
/// to the environment variable, even when invalid.
pub(crate) fn resolve_list<A>(args: A, env_value: Option<&str>) -> Result<Vec<String>, SettingsError>
where
    A: IntoIterator<Item = String>,
{
    let mut args = args.into_iter();
    while let Some(arg) = args.next() {
        if let Some(value) = arg.strip_prefix(SETTINGS_FLAG) {
            if let Some(value) = value.strip_prefix('=') {
                return split_list(value);
            }
            if value.is_empty() {
                let value = args.next().ok_or(SettingsError::MissingFlagValue)?;
                return split_list(&value);
            }
            // Some other flag sharing the prefix, e.g. --settings-dir.
        }
    }
    match env_value {
        Some(value) => split_list(value),
        None => Err(SettingsError::NotConfigured),
    }
}

/// Split a comma-separated source list, trimming each entry.
pub(crate) fn split_list(value: &str) -> Result<Vec<String>, SettingsError> {
    if value.trim().is_empty() {
        return Err(SettingsError::NotConfigured);
    }
    let entries: Vec<String> =
        value.split(',').map(|entry| entry.trim().to_string()).collect();
    if entries.iter().any(String::is_empty) {
        return Err(SettingsError::MalformedSourceList { list: value.to_string() });
    }
    Ok(entries)
}
