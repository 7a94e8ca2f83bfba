//! Shared test utilities for the extension system
//!
//! A scripted loader standing in for the platform dynamic loader, plus
//! helpers for building candidate trees in temporary directories.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use crate::extension::error::{ExtensionError, ExtensionResult};
use crate::extension::identity::ExtensionIdentity;
use crate::extension::loader::{ExtensionLoader, LoadedExtension};
use crate::extension::metadata::ExtensionMetadata;

/// What the scripted loader should do for one candidate, keyed by the
/// candidate's unqualified name.
#[derive(Debug, Clone)]
pub(crate) enum Scripted {
    /// Loading fails outright (the unit raises during load).
    FailToLoad(&'static str),
    /// Loads, but exposes no setup entry point.
    NoEntryPoint,
    /// A well-formed extension with the given declared metadata
    /// (`None` = the unit declares nothing).
    Extension(Option<ExtensionMetadata>),
    /// A well-formed extension whose setup hook panics when invoked.
    PanicsOnRegister,
}

/// Test double for the platform loader. Candidates not named in the script
/// load as well-formed extensions with default metadata.
pub(crate) struct ScriptedLoader {
    script: HashMap<String, Scripted>,
    registrations: Arc<Mutex<Vec<String>>>,
}

impl ScriptedLoader {
    pub(crate) fn new(script: impl IntoIterator<Item = (&'static str, Scripted)>) -> Self {
        Self {
            script: script
                .into_iter()
                .map(|(name, behavior)| (name.to_string(), behavior))
                .collect(),
            registrations: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Qualified names whose setup hooks have been invoked, in order.
    pub(crate) fn registration_log(&self) -> Arc<Mutex<Vec<String>>> {
        Arc::clone(&self.registrations)
    }
}

impl ExtensionLoader for ScriptedLoader {
    fn load(&self, identity: &ExtensionIdentity) -> ExtensionResult<Box<dyn LoadedExtension>> {
        let behavior = self
            .script
            .get(identity.unqualified_name())
            .cloned()
            .unwrap_or(Scripted::Extension(Some(ExtensionMetadata::default())));

        match behavior {
            Scripted::FailToLoad(cause) => Err(ExtensionError::LoadFailed {
                name: identity.qualified_name().to_string(),
                cause: cause.to_string(),
            }),
            Scripted::NoEntryPoint => Ok(Box::new(ScriptedUnit {
                name: identity.qualified_name().to_string(),
                has_entry_point: false,
                metadata: None,
                panics: false,
                registrations: Arc::clone(&self.registrations),
            })),
            Scripted::Extension(metadata) => Ok(Box::new(ScriptedUnit {
                name: identity.qualified_name().to_string(),
                has_entry_point: true,
                metadata,
                panics: false,
                registrations: Arc::clone(&self.registrations),
            })),
            Scripted::PanicsOnRegister => Ok(Box::new(ScriptedUnit {
                name: identity.qualified_name().to_string(),
                has_entry_point: true,
                metadata: Some(ExtensionMetadata::default()),
                panics: true,
                registrations: Arc::clone(&self.registrations),
            })),
        }
    }
}

pub(crate) struct ScriptedUnit {
    name: String,
    has_entry_point: bool,
    metadata: Option<ExtensionMetadata>,
    panics: bool,
    registrations: Arc<Mutex<Vec<String>>>,
}

impl LoadedExtension for ScriptedUnit {
    fn has_entry_point(&self) -> bool {
        self.has_entry_point
    }

    fn metadata(&self) -> Option<ExtensionMetadata> {
        self.metadata
    }

    fn register(&self, host: &mut crate::host::HostContext) -> ExtensionResult<()> {
        if self.panics {
            panic!("scripted setup panic");
        }
        host.register_command(&self.name, "scripted test command");
        self.registrations.lock().unwrap().push(self.name.clone());
        Ok(())
    }
}

/// Create an empty candidate file under `root`, creating parent directories
/// as needed. The scripted loader never opens it; only the path matters.
pub(crate) fn touch(root: &Path, relative: &str) -> PathBuf {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&path, b"").unwrap();
    path
}
