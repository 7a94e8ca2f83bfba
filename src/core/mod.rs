//! Core Services
//!
//! Cross-cutting services shared by the application and the extension system:
//! configuration loading, logging setup, and build metadata.

pub mod config;
pub mod logging;
pub mod version;
