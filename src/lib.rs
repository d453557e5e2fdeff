//! layered-settings: merge named settings sources into a single
//! read-only settings object.
//!
//! Sources are selected at startup with `--settings=<list>` (or
//! `--settings <list>`) on the command line, falling back to the
//! `LAYERED_SETTINGS` environment variable. Each identifier names
//! either a registered settings module or a settings file
//! (`.cfg`/`.conf` key-value, `.json`, `.toml`, `.yaml`/`.yml`).
//! Sources merge in order (later ones win), and environment variables
//! override any merged key of the same name.
//!
//! ```
//! use layered_settings::{Settings, SettingsModule};
//!
//! # fn main() -> Result<(), layered_settings::SettingsError> {
//! SettingsModule::new("docs.base")
//!     .set("APPLICATION_NAME", "docs app")
//!     .set("WORKERS", 4)
//!     .register();
//! SettingsModule::new("docs.production")
//!     .inherits("docs.base")
//!     .set("WORKERS", 16)
//!     .register();
//!
//! let settings = Settings::from_sources(["docs.production"])?;
//! assert_eq!(settings["APPLICATION_NAME"], "docs app");
//! assert_eq!(settings.get_as::<u32>("WORKERS")?, 16);
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod settings;
pub mod source;
pub mod utils;

pub use error::SettingsError;
pub use settings::Settings;
pub use source::{SettingsModule, SETTINGS_VAR};
