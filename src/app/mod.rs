//! Application Module
//!
//! Command line surface and the startup sequence that wires configuration,
//! logging, and the extension system together.

pub mod cli;
pub mod startup;
