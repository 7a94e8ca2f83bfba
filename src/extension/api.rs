//! Public API for the extension system
//!
//! This module provides the complete public interface for the extension
//! system. External modules should import from here rather than directly
//! from internal modules.

// Discovery driver and results
pub use crate::extension::discovery::{DiscoveryIter, ExtensionDiscovery};
pub use crate::extension::types::DiscoveredExtension;

// Error handling
pub use crate::extension::error::{ExtensionError, ExtensionResult};

// Mode flags and activation decisions
pub use crate::extension::activation::{decide, Activation};
pub use crate::extension::modes::RunMode;

// Metadata and identity
pub use crate::extension::identity::{ExtensionIdentity, IdentityResolver, LIBRARY_SUFFIXES};
pub use crate::extension::metadata::{ExtensionMetadata, RawExtensionMetadata};

// Loading seam and the symbols extensions export
pub use crate::extension::loader::{
    ExtensionLoader, LoadedExtension, MetadataFn, NativeLoader, SetupFn, METADATA_SYMBOL,
    SETUP_SYMBOL,
};

// Registration
pub use crate::extension::registry::ExtensionRegistry;

use std::path::Path;

/// Scan `root` once and collect every discovery result.
///
/// Thin wrapper over [`ExtensionDiscovery`] for callers that do not need
/// the lazy traversal.
pub fn discover_extensions(
    root: impl AsRef<Path>,
    namespace: &str,
    active_mode: RunMode,
) -> ExtensionResult<Vec<DiscoveredExtension>> {
    Ok(ExtensionDiscovery::new(root.as_ref(), namespace, active_mode)
        .discover()?
        .collect())
}
