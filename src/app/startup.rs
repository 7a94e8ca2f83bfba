//! Application startup sequence
//!
//! Wires the pieces together in order: command line, configuration, logging,
//! mode determination, builtin registration, then extension discovery. The
//! relay runtime itself (chat transport, command dispatch) attaches to the
//! host once startup has populated it.

use std::io::IsTerminal;
use std::process::ExitCode;

use clap::Parser;
use colored::Colorize;

use crate::app::cli::Args;
use crate::core::config::Config;
use crate::core::logging::init_logging;
use crate::core::version::get_extension_api_version;
use crate::extension::api::{decide, ExtensionDiscovery, ExtensionError, ExtensionRegistry, RunMode};
use crate::extension::builtin;
use crate::host::HostContext;

/// Initialize the host and bring up every eligible extension.
pub async fn startup() -> ExitCode {
    let args = Args::parse();

    let use_color = (args.color || std::io::stdout().is_terminal()) && !args.no_color;
    colored::control::set_override(use_color);

    // Logging is not up yet, so configuration failures go to stderr.
    let config = match Config::load(args.config.clone()).await {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::FAILURE;
        }
    };

    // Command line wins over the configuration file.
    let log_level = args.log_level.as_deref().or(config.logging.level.as_deref());
    let log_format = args
        .log_format
        .as_deref()
        .or(config.logging.format.as_deref());
    let log_file = args.log_file.as_deref().or(config.logging.file.as_deref());

    if let Err(e) = init_logging(log_level, log_format, log_file, use_color) {
        eprintln!("Error: failed to initialize logging: {e}");
        return ExitCode::FAILURE;
    }

    log::info!(
        "modrelay starting (extension API version {})",
        get_extension_api_version()
    );

    let active_mode = RunMode::from_flags(
        config.mode.production,
        config.mode.development || args.dev,
        config.mode.plugin_dev || args.plugin_dev,
    );
    log::debug!("development mode: {}", active_mode.is_development());
    log::debug!("plugin development mode: {}", active_mode.is_plugin_dev());
    log::info!("active mode: {active_mode}");
    if active_mode.is_empty() {
        log::warn!("no run modes are enabled; no extension will activate");
    }

    let mut host = HostContext::new(active_mode);
    let mut registry = ExtensionRegistry::new();

    register_builtins(&mut registry, &mut host, active_mode);
    if !register_externals(&mut registry, &mut host, &args, &config, active_mode) {
        return ExitCode::FAILURE;
    }

    log::info!(
        "startup complete: {} extension(s) active, {} command(s) declared",
        registry.len(),
        host.commands().len()
    );
    print_summary(&registry);

    ExitCode::SUCCESS
}

fn register_builtins(registry: &mut ExtensionRegistry, host: &mut HostContext, active_mode: RunMode) {
    for entry in builtin::all() {
        let metadata = (entry.metadata)();
        let activation = decide(metadata.load_if_mode, active_mode);
        let name = builtin::qualified_name(entry);

        if !activation.eligible {
            log::info!(
                "builtin extension '{}' is not eligible in the current mode (eligible under: {})",
                name,
                activation.eligible_modes.join(", ")
            );
            continue;
        }

        let unit = Box::new(builtin::BuiltinUnit::new(entry));
        if let Err(e) = registry.register(&name, activation.eligible_modes, unit, host) {
            log::error!("{e}");
        }
    }
}

/// Discover and register external extensions. Returns false only on a
/// root-level configuration failure.
fn register_externals(
    registry: &mut ExtensionRegistry,
    host: &mut HostContext,
    args: &Args,
    config: &Config,
    active_mode: RunMode,
) -> bool {
    let explicit_dir = args.extensions_dir.is_some() || config.extensions.dir.is_some();
    let extensions_dir = args
        .extensions_dir
        .clone()
        .unwrap_or_else(|| config.extensions.resolved_dir());

    let mut excluded = config.extensions.exclude.clone();
    excluded.extend(args.exclude.iter().cloned());

    let discovery = ExtensionDiscovery::new(
        extensions_dir.clone(),
        &config.extensions.namespace,
        active_mode,
    )
    .with_exclusions(excluded);

    let results = match discovery.discover() {
        Ok(results) => results,
        Err(ExtensionError::RootNotFound { path }) if !explicit_dir => {
            // Nothing installed at the default location; not an error.
            log::debug!(
                "no extension directory at {}; skipping external discovery",
                path.display()
            );
            return true;
        }
        Err(e) => {
            log::error!("extension discovery failed: {e}");
            return false;
        }
    };

    log::debug!(
        "discovering extensions under {} as '{}'",
        extensions_dir.display(),
        config.extensions.namespace
    );

    for discovered in results {
        let name = discovered.identity.qualified_name().to_string();
        if !discovered.eligible {
            log::info!(
                "extension '{}' is not eligible in the current mode (eligible under: {})",
                name,
                discovered.eligible_modes.join(", ")
            );
            continue;
        }
        if let Err(e) = registry.register_discovered(discovered, host) {
            log::error!("{e}");
        }
    }

    true
}

fn print_summary(registry: &ExtensionRegistry) {
    if registry.is_empty() {
        println!("No extensions active.");
        return;
    }

    println!("Active extensions ({}):", registry.len());
    for name in registry.extension_names() {
        let modes = registry
            .eligible_modes(&name)
            .map(|modes| modes.join("|"))
            .unwrap_or_default();
        println!("  {}  [{}]", name.green(), modes.dimmed());
    }
}
