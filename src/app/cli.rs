//! Command line arguments

use std::path::PathBuf;

use clap::Parser;

#[derive(Debug, Parser)]
#[command(name = "modrelay", version, about = "Moderation relay bot host")]
pub struct Args {
    /// Configuration file (defaults to the platform config directory)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Directory to scan for extensions (overrides configuration)
    #[arg(long, value_name = "DIR")]
    pub extensions_dir: Option<PathBuf>,

    /// Extension name to exclude from discovery (repeatable)
    #[arg(long = "exclude", value_name = "NAME")]
    pub exclude: Vec<String>,

    /// Enable development mode for this run
    #[arg(long)]
    pub dev: bool,

    /// Enable plugin development mode for this run
    #[arg(long)]
    pub plugin_dev: bool,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, value_name = "LEVEL")]
    pub log_level: Option<String>,

    /// Log format (text, json)
    #[arg(long, value_name = "FORMAT")]
    pub log_format: Option<String>,

    /// Write logs to this file instead of stderr
    #[arg(long, value_name = "FILE")]
    pub log_file: Option<PathBuf>,

    /// Force colored output
    #[arg(long)]
    pub color: bool,

    /// Disable colored output
    #[arg(long, conflicts_with = "color")]
    pub no_color: bool,
}
