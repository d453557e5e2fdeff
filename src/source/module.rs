//! Registered settings modules.
//!
//! Rust has no runtime module import, so dotted-path sources resolve
//! against a process-global registry of named modules published by the
//! application before settings are loaded:
//!
//! ```
//! use layered_settings::SettingsModule;
//!
//! SettingsModule::new("myapp.conf.base")
//!     .set("APPLICATION_NAME", "myapp")
//!     .register();
//!
//! SettingsModule::new("myapp.conf.production")
//!     .inherits("myapp.conf.base")
//!     .set("WORKERS", 8)
//!     .register();
//! ```
//!
//! Only uppercase-named entries survive loading, matching the
//! convention that settings constants are written in SCREAMING_CASE.

use crate::error::SettingsError;
use once_cell::sync::Lazy;
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::RwLock;

#[derive(Clone, Debug, Default)]
struct ModuleDef {
    bases: Vec<String>,
    entries: BTreeMap<String, Value>,
}

static REGISTRY: Lazy<RwLock<BTreeMap<String, ModuleDef>>> =
    Lazy::new(|| RwLock::new(BTreeMap::new()));

/// Builder for a named settings module.
#[derive(Debug)]
pub struct SettingsModule {
    name: String,
    def: ModuleDef,
}

impl SettingsModule {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), def: ModuleDef::default() }
    }

    /// Add one settings entry. Entries without an uppercase name are
    /// kept in the module but skipped when it is loaded.
    pub fn set(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.def.entries.insert(key.into(), value.into());
        self
    }

    /// Inherit every entry of another registered module. Bases apply in
    /// declaration order, before this module's own entries.
    pub fn inherits(mut self, base: impl Into<String>) -> Self {
        self.def.bases.push(base.into());
        self
    }

    /// Publish the module, replacing any module previously registered
    /// under the same name.
    pub fn register(self) {
        tracing::debug!(module = self.name.as_str(), "registering settings module");
        REGISTRY.write().expect("settings module registry poisoned").insert(self.name, self.def);
    }
}

/// Resolve a registered module into its uppercase entries, bases first.
pub(crate) fn load(name: &str) -> Result<BTreeMap<String, Value>, SettingsError> {
    let registry = REGISTRY.read().expect("settings module registry poisoned");
    let mut resolved = BTreeMap::new();
    let mut stack = Vec::new();
    resolve(&registry, name, name, &mut stack, &mut resolved)?;
    Ok(resolved)
}

fn resolve(
    registry: &BTreeMap<String, ModuleDef>,
    root: &str,
    name: &str,
    stack: &mut Vec<String>,
    out: &mut BTreeMap<String, Value>,
) -> Result<(), SettingsError> {
    if stack.iter().any(|seen| seen == name) {
        return Err(SettingsError::InvalidSource {
            name: root.to_string(),
            reason: format!("module inheritance cycle through `{name}`"),
        });
    }
    let def = registry
        .get(name)
        .ok_or_else(|| SettingsError::SourceNotFound { name: name.to_string() })?;

    stack.push(name.to_string());
    for base in &def.bases {
        resolve(registry, root, base, stack, out)?;
    }
    stack.pop();

    for (key, value) in &def.entries {
        if is_upper_key(key) {
            out.insert(key.clone(), value.clone());
        }
    }
    Ok(())
}

/// At least one uppercase letter and no lowercase letters.
fn is_upper_key(key: &str) -> bool {
    key.chars().any(char::is_uppercase) && !key.chars().any(char::is_lowercase)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn registered_module_loads_its_entries() {
        SettingsModule::new("module_tests.basic")
            .set("SIMPLE_STRING", "simple")
            .set("SIMPLE_INTEGER", 1)
            .register();

        let entries = load("module_tests.basic").unwrap();
        assert_eq!(entries["SIMPLE_STRING"], "simple");
        assert_eq!(entries["SIMPLE_INTEGER"], 1);
    }

    #[test]
    fn lowercase_entries_are_skipped() {
        SettingsModule::new("module_tests.case")
            .set("UPPER", true)
            .set("lower", true)
            .set("Mixed", true)
            .set("WITH_1_DIGIT", true)
            .register();

        let entries = load("module_tests.case").unwrap();
        assert_eq!(entries.len(), 2);
        assert!(entries.contains_key("UPPER"));
        assert!(entries.contains_key("WITH_1_DIGIT"));
    }

    #[test]
    fn reregistering_replaces_the_module() {
        SettingsModule::new("module_tests.replace").set("VALUE", 1).register();
        SettingsModule::new("module_tests.replace").set("VALUE", 2).register();

        let entries = load("module_tests.replace").unwrap();
        assert_eq!(entries["VALUE"], 2);
    }

    #[test]
    fn inherited_entries_come_from_the_base() {
        SettingsModule::new("module_tests.inherit_base")
            .set("APPLICATION_NAME", "base app")
            .set("BASE_ONLY", "kept")
            .register();
        SettingsModule::new("module_tests.inherit_child")
            .inherits("module_tests.inherit_base")
            .set("APPLICATION_NAME", "child app")
            .register();

        let entries = load("module_tests.inherit_child").unwrap();
        assert_eq!(entries["APPLICATION_NAME"], "child app");
        assert_eq!(entries["BASE_ONLY"], "kept");
    }

    #[test]
    fn later_bases_override_earlier_ones() {
        SettingsModule::new("module_tests.multi_a").set("SHARED", "a").register();
        SettingsModule::new("module_tests.multi_b").set("SHARED", "b").register();
        SettingsModule::new("module_tests.multi_child")
            .inherits("module_tests.multi_a")
            .inherits("module_tests.multi_b")
            .register();

        let entries = load("module_tests.multi_child").unwrap();
        assert_eq!(entries["SHARED"], "b");
    }

    #[test]
    fn unknown_module_is_not_found() {
        let err = load("module_tests.never_registered").unwrap_err();
        assert!(matches!(err, SettingsError::SourceNotFound { .. }));
    }

    #[test]
    fn unknown_base_is_not_found() {
        SettingsModule::new("module_tests.orphan")
            .inherits("module_tests.missing_base")
            .register();

        let err = load("module_tests.orphan").unwrap_err();
        assert!(matches!(err, SettingsError::SourceNotFound { .. }));
    }

    #[test]
    fn inheritance_cycle_is_rejected() {
        SettingsModule::new("module_tests.cycle_a").inherits("module_tests.cycle_b").register();
        SettingsModule::new("module_tests.cycle_b").inherits("module_tests.cycle_a").register();

        let err = load("module_tests.cycle_a").unwrap_err();
        assert!(matches!(err, SettingsError::InvalidSource { .. }));
    }

    #[test]
    fn nested_values_are_cloned_into_the_result() {
        SettingsModule::new("module_tests.nested")
            .set("COMPLEX_DICT", json!({"complex": "settings", "foo": "bar"}))
            .register();

        let entries = load("module_tests.nested").unwrap();
        assert_eq!(entries["COMPLEX_DICT"]["complex"], "settings");
    }
}
