//! Host information extension.
//!
//! Declares the informational command surfaces every deployment gets,
//! whatever mode the host runs in.

use crate::extension::metadata::ExtensionMetadata;
use crate::extension::modes::RunMode;
use crate::host::HostContext;

fn metadata() -> ExtensionMetadata {
    ExtensionMetadata::new(RunMode::PRODUCTION | RunMode::DEVELOPMENT | RunMode::PLUGIN_DEV)
}

fn setup(host: &mut HostContext) {
    host.register_command("about", "Show host version and build information");
    host.register_command("uptime", "Report how long the host has been running");
}

crate::builtin_extension!("meta", metadata, setup);
