//! Extension metadata
//!
//! The gating information an extension declares about itself: the modes it
//! wants to be loaded under and the API version it was built against. Units
//! that declare nothing get the production-only default.

use crate::core::version::get_extension_api_version;
use crate::extension::modes::RunMode;

/// Declared gating information for an extension. Immutable once extracted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtensionMetadata {
    /// Modes under which the extension is eligible to load.
    pub load_if_mode: RunMode,
    /// Extension API version the unit was built against.
    pub api_version: u32,
}

impl ExtensionMetadata {
    /// Metadata gated on the given modes, built against the current host API.
    pub fn new(load_if_mode: RunMode) -> Self {
        Self {
            load_if_mode,
            api_version: get_extension_api_version(),
        }
    }

    /// The default substituted for units that declare no metadata.
    pub fn assumed(host_api_version: u32) -> Self {
        Self {
            load_if_mode: RunMode::default(),
            api_version: host_api_version,
        }
    }

    pub fn is_compatible_with(&self, host_api_version: u32) -> bool {
        self.api_version == host_api_version
    }
}

impl Default for ExtensionMetadata {
    fn default() -> Self {
        Self::assumed(get_extension_api_version())
    }
}

/// Metadata in the form external units export it through the `ext_metadata`
/// descriptor symbol. Plain integers keep the boundary ABI-stable.
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct RawExtensionMetadata {
    pub api_version: u32,
    pub load_if_mode: u32,
}

impl From<RawExtensionMetadata> for ExtensionMetadata {
    fn from(raw: RawExtensionMetadata) -> Self {
        Self {
            load_if_mode: RunMode::from_bits(raw.load_if_mode),
            api_version: raw.api_version,
        }
    }
}

impl From<ExtensionMetadata> for RawExtensionMetadata {
    fn from(metadata: ExtensionMetadata) -> Self {
        Self {
            api_version: metadata.api_version,
            load_if_mode: metadata.load_if_mode.bits(),
        }
    }
}
