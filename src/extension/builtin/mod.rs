//! Builtin Extensions
//!
//! Extensions compiled into the host, registered through a compile-time
//! table rather than discovered from the filesystem. Builtins declare the
//! same metadata as external extensions and pass through the same activation
//! decision, so mode gating behaves identically for both.

pub(crate) mod devtools;
pub(crate) mod meta;

use crate::extension::error::ExtensionResult;
use crate::extension::loader::LoadedExtension;
use crate::extension::metadata::ExtensionMetadata;
use crate::host::HostContext;

/// Entry for a builtin extension in the compile-time registry.
pub struct BuiltinEntry {
    /// Unqualified extension name; registered as `builtin.<name>`.
    pub name: &'static str,
    pub metadata: fn() -> ExtensionMetadata,
    pub setup: fn(&mut HostContext),
}

inventory::collect!(BuiltinEntry);

/// Macro for registering builtin extensions
#[macro_export]
macro_rules! builtin_extension {
    ($name:expr, $metadata:expr, $setup:expr) => {
        inventory::submit!($crate::extension::builtin::BuiltinEntry {
            name: $name,
            metadata: $metadata,
            setup: $setup,
        });
    };
}

/// All registered builtin extensions, in stable name order.
pub fn all() -> Vec<&'static BuiltinEntry> {
    let mut entries: Vec<&'static BuiltinEntry> = inventory::iter::<BuiltinEntry>().collect();
    entries.sort_by_key(|entry| entry.name);
    entries
}

/// Qualified name a builtin is registered under.
pub fn qualified_name(entry: &BuiltinEntry) -> String {
    format!("builtin.{}", entry.name)
}

/// Loaded-unit adapter so builtins flow through the same registry path as
/// external extensions.
pub(crate) struct BuiltinUnit {
    entry: &'static BuiltinEntry,
}

impl BuiltinUnit {
    pub(crate) fn new(entry: &'static BuiltinEntry) -> Self {
        Self { entry }
    }
}

impl LoadedExtension for BuiltinUnit {
    fn has_entry_point(&self) -> bool {
        true
    }

    fn metadata(&self) -> Option<ExtensionMetadata> {
        Some((self.entry.metadata)())
    }

    fn register(&self, host: &mut HostContext) -> ExtensionResult<()> {
        (self.entry.setup)(host);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extension::modes::RunMode;

    #[test]
    fn table_contains_shipped_builtins_in_name_order() {
        let names: Vec<&str> = all().iter().map(|entry| entry.name).collect();
        assert_eq!(names, vec!["devtools", "meta"]);
    }

    #[test]
    fn qualified_names_carry_the_builtin_prefix() {
        let entry = all()
            .into_iter()
            .find(|entry| entry.name == "meta")
            .unwrap();
        assert_eq!(qualified_name(entry), "builtin.meta");
    }

    #[test]
    fn meta_is_eligible_in_every_mode() {
        let entry = all()
            .into_iter()
            .find(|entry| entry.name == "meta")
            .unwrap();
        let declared = (entry.metadata)().load_if_mode;
        assert!(declared.includes(RunMode::PRODUCTION));
        assert!(declared.includes(RunMode::DEVELOPMENT));
        assert!(declared.includes(RunMode::PLUGIN_DEV));
    }

    #[test]
    fn devtools_is_gated_off_production() {
        let entry = all()
            .into_iter()
            .find(|entry| entry.name == "devtools")
            .unwrap();
        let declared = (entry.metadata)().load_if_mode;
        assert!(!declared.includes(RunMode::PRODUCTION));
        assert!(declared.includes(RunMode::DEVELOPMENT));
        assert!(declared.includes(RunMode::PLUGIN_DEV));
    }

    #[test]
    fn builtin_unit_registers_through_the_setup_hook() {
        let entry = all()
            .into_iter()
            .find(|entry| entry.name == "meta")
            .unwrap();
        let unit = BuiltinUnit::new(entry);
        assert!(unit.has_entry_point());

        let mut host = HostContext::new(RunMode::PRODUCTION);
        unit.register(&mut host).unwrap();
        assert!(!host.commands().is_empty());
    }
}
