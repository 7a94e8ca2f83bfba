//! Extension development helpers.
//!
//! Command surfaces for inspecting and reloading extensions while working
//! on the host or on an extension. Never active in a pure production run.

use crate::extension::metadata::ExtensionMetadata;
use crate::extension::modes::RunMode;
use crate::host::HostContext;

fn metadata() -> ExtensionMetadata {
    ExtensionMetadata::new(RunMode::DEVELOPMENT | RunMode::PLUGIN_DEV)
}

fn setup(host: &mut HostContext) {
    host.register_command("ext-list", "List discovered extensions and their modes");
    host.register_command("ext-info", "Show identity and metadata for one extension");
}

crate::builtin_extension!("devtools", metadata, setup);
