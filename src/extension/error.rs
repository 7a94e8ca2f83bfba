//! Extension Error Handling
//!
//! Error types for the extension system. Per-candidate failures (load
//! errors, version mismatches) are recovered inside the discovery driver and
//! surface only as log entries; the variants here also serve as the logged
//! diagnostics. Only root-level configuration failures propagate to the
//! caller, before any candidate is visited.

use std::path::PathBuf;

/// Result type alias for extension operations
pub type ExtensionResult<T> = std::result::Result<T, ExtensionError>;

#[derive(Debug, thiserror::Error)]
pub enum ExtensionError {
    /// The candidate's code failed during isolated loading. Recovered
    /// locally; never aborts a scan.
    #[error("failed to load extension '{name}': {cause}")]
    LoadFailed { name: String, cause: String },

    /// The unit was built against a different extension API version.
    #[error("extension '{name}' targets API version {extension_api}, host provides {host_api}")]
    VersionIncompatible {
        name: String,
        extension_api: u32,
        host_api: u32,
    },

    /// The configured extension root does not exist. Reported once, up
    /// front, before any candidate is visited.
    #[error("extension root does not exist: {}", path.display())]
    RootNotFound { path: PathBuf },

    /// The configured extension root exists but cannot be read.
    #[error("extension root is not readable: {}: {cause}", path.display())]
    RootNotReadable { path: PathBuf, cause: String },

    /// A unit with this qualified name is already registered.
    #[error("extension '{name}' is already registered")]
    AlreadyRegistered { name: String },

    /// The unit's registration hook failed or panicked.
    #[error("extension '{name}' failed during registration: {cause}")]
    RegistrationFailed { name: String, cause: String },
}
