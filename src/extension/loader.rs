//! Extension loading
//!
//! `ExtensionLoader` is the narrow seam between discovery and the platform
//! loading mechanism. The production implementation loads each candidate as
//! a shared library through the platform dynamic loader; tests substitute
//! scripted loaders behind the same trait.
//!
//! The central guarantee lives at this boundary: any failure while loading a
//! unit is caught and converted into an error value for that unit only, so
//! one broken extension never aborts a scan.

use crate::extension::error::{ExtensionError, ExtensionResult};
use crate::extension::identity::ExtensionIdentity;
use crate::extension::metadata::{ExtensionMetadata, RawExtensionMetadata};
use crate::host::HostContext;

/// Required registration symbol every extension must export.
pub const SETUP_SYMBOL: &[u8] = b"setup";
/// Optional metadata descriptor symbol.
pub const METADATA_SYMBOL: &[u8] = b"ext_metadata";

/// Signature of the registration hook. Fire-and-forget: the extension
/// registers itself into the host and returns nothing.
pub type SetupFn = unsafe extern "C" fn(host: *mut HostContext);

/// Signature of the metadata descriptor.
pub type MetadataFn = unsafe extern "C" fn() -> RawExtensionMetadata;

/// Opaque handle to a successfully loaded unit, inspected by the discovery
/// driver and invoked by the registry. Holding the handle keeps the
/// underlying library alive.
pub trait LoadedExtension: Send {
    /// Whether the unit exposes the required `setup` registration hook.
    fn has_entry_point(&self) -> bool;

    /// Metadata the unit declares, if any.
    fn metadata(&self) -> Option<ExtensionMetadata>;

    /// Invoke the registration hook with the host instance. The host
    /// reference is passed through opaquely; the extension system never
    /// inspects it.
    fn register(&self, host: &mut HostContext) -> ExtensionResult<()>;
}

/// Loads a candidate into an isolated, independently-executing unit.
pub trait ExtensionLoader: Send + Sync {
    fn load(&self, identity: &ExtensionIdentity) -> ExtensionResult<Box<dyn LoadedExtension>>;
}

/// Production loader over the platform dynamic-library mechanism.
pub struct NativeLoader;

impl NativeLoader {
    pub fn new() -> Self {
        Self
    }
}

impl Default for NativeLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ExtensionLoader for NativeLoader {
    fn load(&self, identity: &ExtensionIdentity) -> ExtensionResult<Box<dyn LoadedExtension>> {
        // SAFETY: loading executes the library's initialization sections.
        // Units reaching this point are locally-installed extensions; a unit
        // that fails to load is reported as not installed and the scan
        // continues.
        let library = unsafe { libloading::Library::new(identity.path()) }.map_err(|e| {
            ExtensionError::LoadFailed {
                name: identity.qualified_name().to_string(),
                cause: e.to_string(),
            }
        })?;

        let has_entry_point = unsafe { library.get::<SetupFn>(SETUP_SYMBOL) }.is_ok();
        let metadata = match unsafe { library.get::<MetadataFn>(METADATA_SYMBOL) } {
            Ok(descriptor) => Some(ExtensionMetadata::from(unsafe { descriptor() })),
            Err(_) => None,
        };

        Ok(Box::new(NativeExtension {
            name: identity.qualified_name().to_string(),
            library,
            has_entry_point,
            metadata,
        }))
    }
}

/// A shared library loaded as an extension. The library handle is kept for
/// the lifetime of the unit so its code stays mapped.
struct NativeExtension {
    name: String,
    library: libloading::Library,
    has_entry_point: bool,
    metadata: Option<ExtensionMetadata>,
}

impl LoadedExtension for NativeExtension {
    fn has_entry_point(&self) -> bool {
        self.has_entry_point
    }

    fn metadata(&self) -> Option<ExtensionMetadata> {
        self.metadata
    }

    fn register(&self, host: &mut HostContext) -> ExtensionResult<()> {
        let setup = unsafe { self.library.get::<SetupFn>(SETUP_SYMBOL) }.map_err(|e| {
            ExtensionError::RegistrationFailed {
                name: self.name.clone(),
                cause: e.to_string(),
            }
        })?;

        // SAFETY: the symbol matches the versioned `SetupFn` contract; the
        // version gate has already rejected units built against a different
        // API.
        unsafe { setup(host as *mut HostContext) };
        Ok(())
    }
}
