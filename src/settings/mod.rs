//! The resolved settings object.
//!
//! `Settings` merges an ordered list of sources into one read-only
//! map, applies environment-variable overrides on top, and exposes the
//! result through fallible accessors and a deep-copy snapshot.

use crate::error::SettingsError;
use crate::source;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::BTreeMap;
use std::ops::Index;

/// Immutable settings resolved from an ordered list of sources.
///
/// Later sources override earlier ones for the same key; after the
/// merge, any environment variable named exactly like a merged key
/// replaces its value. Construction is the only point of failure;
/// once built, the map never changes.
#[derive(Clone, Debug)]
pub struct Settings {
    sources: Vec<String>,
    values: BTreeMap<String, Value>,
}

impl Settings {
    /// Resolve the source list from the process arguments (first
    /// `--settings=<list>` or `--settings <list>`) or the
    /// `LAYERED_SETTINGS` environment variable, then load and merge.
    pub fn load() -> Result<Self, SettingsError> {
        let env_value = std::env::var(source::SETTINGS_VAR).ok();
        let sources = source::resolve_list(std::env::args().skip(1), env_value.as_deref())?;
        Self::build(sources, |key| std::env::var(key).ok())
    }

    /// Build from a comma-separated source list, as it would appear in
    /// the flag or the environment variable.
    pub fn from_list(list: &str) -> Result<Self, SettingsError> {
        Self::build(source::split_list(list)?, |key| std::env::var(key).ok())
    }

    /// Build from an explicit source list. Environment overrides still
    /// apply.
    pub fn from_sources<I, S>(sources: I) -> Result<Self, SettingsError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let sources: Vec<String> = sources.into_iter().map(Into::into).collect();
        if sources.is_empty() {
            return Err(SettingsError::NotConfigured);
        }
        Self::build(sources, |key| std::env::var(key).ok())
    }

    fn build(
        sources: Vec<String>,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, SettingsError> {
        let mut values = BTreeMap::new();
        for name in &sources {
            let loaded = source::load(name)?;
            tracing::debug!(source = name.as_str(), entries = loaded.len(), "merged source");
            values.extend(loaded);
        }
        for (key, value) in values.iter_mut() {
            if let Some(raw) = env(key) {
                tracing::debug!(key = key.as_str(), "environment override applied");
                *value = Value::String(raw);
            }
        }
        Ok(Self { sources, values })
    }

    /// The source identifiers this object was resolved from, in merge
    /// order.
    pub fn sources(&self) -> &[String] {
        &self.sources
    }

    /// Attribute-style access.
    pub fn get(&self, key: &str) -> Result<&Value, SettingsError> {
        self.values.get(key).ok_or_else(|| SettingsError::UnknownKey { key: key.to_string() })
    }

    /// Typed access through serde.
    pub fn get_as<T: DeserializeOwned>(&self, key: &str) -> Result<T, SettingsError> {
        let value = self.get(key)?;
        serde_json::from_value(value.clone()).map_err(|e| SettingsError::Deserialize {
            key: key.to_string(),
            reason: e.to_string(),
        })
    }

    /// Snapshot export: an owned deep copy of the resolved map.
    /// Mutating the returned map (nested values included) never
    /// affects this object.
    pub fn as_dict(&self) -> BTreeMap<String, Value> {
        self.values.clone()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Item-style access. Panics with the `UnknownKey` message when the
/// key is missing; use [`Settings::get`] for fallible access.
impl Index<&str> for Settings {
    type Output = Value;

    fn index(&self, key: &str) -> &Value {
        match self.get(key) {
            Ok(value) => value,
            Err(err) => panic!("{err}"),
        }
    }
}
