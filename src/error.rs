//! Error type for settings resolution and access.

use thiserror::Error;

/// Everything that can go wrong while resolving or reading settings.
///
/// Construction is all-or-nothing: the first failing source aborts the
/// whole load and no partial settings object is handed out. After
/// construction only the accessor variants (`UnknownKey`,
/// `Deserialize`) can occur.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// Neither a `--settings` flag nor the environment variable
    /// supplied a non-empty source list.
    #[error("no settings sources configured; pass --settings=<list> or set LAYERED_SETTINGS")]
    NotConfigured,

    /// `--settings` was the last argument, with no value after it.
    #[error("--settings flag given without a value")]
    MissingFlagValue,

    /// The source list contained an empty entry (e.g. `a,,b`).
    #[error("settings source list `{list}` contains an empty entry")]
    MalformedSourceList { list: String },

    /// A settings file does not exist, or a module name is not
    /// registered.
    #[error("settings source `{name}` not found")]
    SourceNotFound { name: String },

    /// No loader recognizes the identifier.
    #[error("no loader for settings source `{name}`")]
    UnsupportedSource { name: String },

    /// The source exists but could not be read or parsed.
    #[error("invalid settings source `{name}`: {reason}")]
    InvalidSource { name: String, reason: String },

    /// Attribute or item access for a key that is not in the resolved
    /// map.
    #[error("unknown setting `{key}`")]
    UnknownKey { key: String },

    /// Typed access failed to convert the stored value.
    #[error("setting `{key}` has an incompatible value: {reason}")]
    Deserialize { key: String, reason: String },
}
