//! Logging setup over the flexi_logger backend.
//!
//! The logger is initialized once during startup; the handle is retained so
//! the level can be tightened or relaxed after the configuration file has
//! been read. Format and output destination are fixed at initialization.

use std::path::Path;
use std::sync::{Mutex, OnceLock};

use flexi_logger::{DeferredNow, FileSpec, Logger, LoggerHandle};

static LOGGER_HANDLE: OnceLock<Mutex<LoggerHandle>> = OnceLock::new();

/// Initialize process-wide logging.
///
/// `format` selects between "text" (default) and "json" line formats;
/// `color` applies only to the text format. When `file` is given, output
/// goes to that file instead of stderr.
pub fn init_logging(
    level: Option<&str>,
    format: Option<&str>,
    file: Option<&Path>,
    color: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut logger = Logger::try_with_str(level.unwrap_or("info"))?;

    logger = match (format.unwrap_or("text"), color) {
        ("json", _) => logger.format(json_format),
        (_, true) => logger.format(text_color_format),
        _ => logger.format(text_format),
    };

    if let Some(path) = file {
        logger = logger.log_to_file(FileSpec::try_from(path)?);
    }

    let handle = logger.start()?;
    let _ = LOGGER_HANDLE.set(Mutex::new(handle));
    Ok(())
}

/// Change the active log level after initialization.
///
/// Only the level can change at runtime; format and destination are fixed
/// when the logger starts.
pub fn set_log_level(spec: &str) -> Result<(), Box<dyn std::error::Error>> {
    let handle_mutex = LOGGER_HANDLE
        .get()
        .ok_or("logger not initialised; call init_logging first")?;
    let mut handle = handle_mutex
        .lock()
        .map_err(|_| "could not acquire logger handle lock")?;
    handle.parse_and_push_temp_spec(spec)?;
    Ok(())
}

// "2026-08-01 12:00:00.123 INFO  message  [modrelay::extension::discovery]"
fn text_format(
    w: &mut dyn std::io::Write,
    now: &mut DeferredNow,
    record: &log::Record,
) -> Result<(), std::io::Error> {
    write!(
        w,
        "{} {:<5} {}  [{}]",
        now.format("%Y-%m-%d %H:%M:%S%.3f"),
        record.level(),
        record.args(),
        record.target(),
    )
}

fn text_color_format(
    w: &mut dyn std::io::Write,
    now: &mut DeferredNow,
    record: &log::Record,
) -> Result<(), std::io::Error> {
    use colored::Colorize;

    let level = format!("{:<5}", record.level());
    let level = match record.level() {
        log::Level::Error => level.red().bold(),
        log::Level::Warn => level.yellow(),
        log::Level::Info => level.green(),
        log::Level::Debug => level.blue(),
        log::Level::Trace => level.magenta(),
    };

    write!(
        w,
        "{} {} {}  {}",
        now.format("%Y-%m-%d %H:%M:%S%.3f").to_string().dimmed(),
        level,
        record.args(),
        format!("[{}]", record.target()).dimmed(),
    )
}

fn json_format(
    w: &mut dyn std::io::Write,
    now: &mut DeferredNow,
    record: &log::Record,
) -> Result<(), std::io::Error> {
    let line = serde_json::json!({
        "timestamp": now.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string(),
        "level": record.level().to_string(),
        "message": record.args().to_string(),
        "target": record.target(),
    });
    w.write_all(line.to_string().as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::sync::Once;

    static INIT: Once = Once::new();

    fn init_test_logging() {
        INIT.call_once(|| {
            let _ = init_logging(Some("debug"), None, None, false);
        });
    }

    #[test]
    #[serial]
    fn log_macros_work_after_init() {
        init_test_logging();
        log::info!("logging smoke test");
        log::debug!("logging smoke test at debug");
    }

    #[test]
    #[serial]
    fn level_can_be_changed_after_init() {
        init_test_logging();
        assert!(set_log_level("trace").is_ok());
    }

    #[test]
    fn text_format_contains_level_and_message() {
        let mut buffer = Vec::new();
        let mut now = DeferredNow::new();
        let record = log::Record::builder()
            .level(log::Level::Info)
            .target("modrelay::test")
            .args(format_args!("hello"))
            .build();

        text_format(&mut buffer, &mut now, &record).unwrap();
        let output = String::from_utf8(buffer).unwrap();
        assert!(output.contains("INFO"));
        assert!(output.contains("hello"));
        assert!(output.contains("[modrelay::test]"));
    }

    #[test]
    fn json_format_is_valid_json() {
        let mut buffer = Vec::new();
        let mut now = DeferredNow::new();
        let record = log::Record::builder()
            .level(log::Level::Warn)
            .target("modrelay::test")
            .args(format_args!("structured"))
            .build();

        json_format(&mut buffer, &mut now, &record).unwrap();
        let parsed: serde_json::Value = serde_json::from_slice(&buffer).unwrap();
        assert_eq!(parsed["level"], "WARN");
        assert_eq!(parsed["message"], "structured");
    }
}
