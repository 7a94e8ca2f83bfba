//! Extension System Module
//!
//! Discovery and mode-gated activation of independently-authored extensions.
//! A scanner walks a directory tree of extension libraries, loads each one
//! in isolation, checks the registration contract, and reconciles the
//! extension's declared mode mask against the process-wide active mode.
//! Registration itself is performed by the caller through the registry.

// Internal modules - external access goes through the api module
pub(crate) mod activation;
pub(crate) mod discovery;
pub(crate) mod error;
pub(crate) mod identity;
pub(crate) mod loader;
pub(crate) mod metadata;
pub(crate) mod modes;
pub(crate) mod registry;
pub(crate) mod types;

// Builtin registration table; public so the submission macro resolves from
// extension crates as well.
pub mod builtin;

// Public API module - the public interface for the extension system
pub mod api;

#[cfg(test)]
mod tests;
