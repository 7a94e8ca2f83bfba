//! Type definitions for the extension system

use crate::extension::identity::ExtensionIdentity;
use crate::extension::loader::LoadedExtension;

/// One discovery result: the extension's identity, whether it should
/// activate under the current mode, the modes it is eligible under, and the
/// opaque handle to the loaded unit. Transient; consumed by the caller that
/// performs registration.
pub struct DiscoveredExtension {
    pub identity: ExtensionIdentity,
    pub eligible: bool,
    pub eligible_modes: Vec<&'static str>,
    pub unit: Box<dyn LoadedExtension>,
}

impl std::fmt::Debug for DiscoveredExtension {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DiscoveredExtension")
            .field("identity", &self.identity)
            .field("eligible", &self.eligible)
            .field("eligible_modes", &self.eligible_modes)
            .finish_non_exhaustive()
    }
}
