// ============================================================================
// kako-cli/src/logging.rs
// ============================================================================
//
// LOGGING SETUP: fern Dispatch for Console and Log File
//
// The interactive conversation is written straight to stdout, so log records
// go to stderr and stay quiet (warnings and errors only) unless --verbose is
// given. With --log-dir every record down to debug is also appended to a
// timestamped file in that directory.

use crate::error::CliResult;

use log::LevelFilter;
use std::fs;
use std::path::{Path, PathBuf};

/// Returns the current local timestamp formatted as "YYYYMMDD_HHMMSS".
///
/// # Example
/// ```
/// let log_filename = format!("kako_run_{}.log", kako_cli::logging::get_timestamp());
/// assert!(log_filename.starts_with("kako_run_"));
/// ```
pub fn get_timestamp() -> String {
    chrono::Local::now().format("%Y%m%d_%H%M%S").to_string()
}

/// Level used for stderr output.
pub fn console_level(verbose: bool) -> LevelFilter {
    if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    }
}

/// Installs the global logger. Returns the log file path when one was opened.
pub fn init_logging(verbose: bool, log_dir: Option<&Path>) -> CliResult<Option<PathBuf>> {
    let console = fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!("[{}] {}", record.level(), message))
        })
        .level(console_level(verbose))
        .chain(std::io::stderr());

    let mut root = fern::Dispatch::new()
        .level(LevelFilter::Debug)
        .chain(console);

    let mut log_path = None;
    if let Some(dir) = log_dir {
        fs::create_dir_all(dir).map_err(fern::InitError::Io)?;
        let path = dir.join(format!("kako_run_{}.log", get_timestamp()));
        let file = fern::Dispatch::new()
            .format(|out, message, record| {
                out.finish(format_args!(
                    "{} [{}] {}: {}",
                    chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
                    record.level(),
                    record.target(),
                    message
                ))
            })
            .level(LevelFilter::Debug)
            .chain(fern::log_file(&path).map_err(fern::InitError::Io)?);
        root = root.chain(file);
        log_path = Some(path);
    }

    root.apply().map_err(fern::InitError::SetLoggerError)?;
    Ok(log_path)
}
