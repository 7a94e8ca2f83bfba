//! Extension Registry
//!
//! Registration side of the extension system: invokes each unit's setup
//! hook with the host instance and keeps the registered units (and their
//! underlying libraries) alive. Discovery only reports decisions; this is
//! the caller that acts on them.

use std::collections::HashMap;
use std::panic::{catch_unwind, AssertUnwindSafe};

use crate::extension::error::{ExtensionError, ExtensionResult};
use crate::extension::loader::LoadedExtension;
use crate::extension::types::DiscoveredExtension;
use crate::host::HostContext;

struct RegisteredExtension {
    eligible_modes: Vec<&'static str>,
    unit: Box<dyn LoadedExtension>,
}

/// Registry of activated extensions, keyed by qualified name.
pub struct ExtensionRegistry {
    extensions: HashMap<String, RegisteredExtension>,
}

impl std::fmt::Debug for ExtensionRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExtensionRegistry")
            .field("extensions", &self.extension_names())
            .finish()
    }
}

impl ExtensionRegistry {
    pub fn new() -> Self {
        Self {
            extensions: HashMap::new(),
        }
    }

    /// Register a unit under `name`, invoking its setup hook with the host.
    ///
    /// A hook that fails or panics leaves the registry unchanged; the unit
    /// is dropped and the error describes the cause.
    pub fn register(
        &mut self,
        name: &str,
        eligible_modes: Vec<&'static str>,
        unit: Box<dyn LoadedExtension>,
        host: &mut HostContext,
    ) -> ExtensionResult<()> {
        if self.extensions.contains_key(name) {
            return Err(ExtensionError::AlreadyRegistered {
                name: name.to_string(),
            });
        }

        match catch_unwind(AssertUnwindSafe(|| unit.register(host))) {
            Ok(Ok(())) => {}
            Ok(Err(err)) => return Err(err),
            Err(payload) => {
                return Err(ExtensionError::RegistrationFailed {
                    name: name.to_string(),
                    cause: panic_message(payload),
                });
            }
        }

        log::debug!("registered extension '{name}'");
        self.extensions.insert(
            name.to_string(),
            RegisteredExtension {
                eligible_modes,
                unit,
            },
        );
        Ok(())
    }

    /// Register a discovery result under its qualified name.
    pub fn register_discovered(
        &mut self,
        discovered: DiscoveredExtension,
        host: &mut HostContext,
    ) -> ExtensionResult<()> {
        let name = discovered.identity.qualified_name().to_string();
        self.register(&name, discovered.eligible_modes, discovered.unit, host)
    }

    pub fn is_registered(&self, name: &str) -> bool {
        self.extensions.contains_key(name)
    }

    /// Mode names a registered extension declared itself eligible under.
    pub fn eligible_modes(&self, name: &str) -> Option<&[&'static str]> {
        self.extensions
            .get(name)
            .map(|ext| ext.eligible_modes.as_slice())
    }

    /// Names of all registered extensions, sorted.
    pub fn extension_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.extensions.keys().cloned().collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.extensions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.extensions.is_empty()
    }
}

impl Default for ExtensionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

fn panic_message(payload: Box<dyn std::any::Any + Send>) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "registration hook panicked".to_string()
    }
}
