//! Implementation of the interactive run.
//!
//! Resolves which ffmpeg binary to use, then hands stdin and stdout to a
//! [`Session`].

use crate::cli::Cli;
use crate::error::{CliError, CliResult};
use crate::logging;
use crate::session::{RunSummary, Session};
use crate::terminal;

use kako_core::SidecarSpawner;

use std::io;
use std::path::{Path, PathBuf};

use log::{debug, info};

/// Picks the ffmpeg binary: an explicit override must name an existing
/// file; otherwise the bundled binary is installed into the user cache.
pub fn resolve_decoder(override_path: Option<&Path>) -> CliResult<PathBuf> {
    match override_path {
        Some(path) if path.is_file() => {
            debug!("Using ffmpeg override {}", path.display());
            Ok(path.to_path_buf())
        }
        Some(path) => Err(CliError::DecoderOverride(path.to_path_buf())),
        None => Ok(kako_core::locate_decoder()?),
    }
}

/// Runs one interactive session on the process's stdin and stdout.
pub fn run_interactive(cli: &Cli) -> CliResult<RunSummary> {
    terminal::set_color(!cli.no_color);

    if let Some(log_path) = logging::init_logging(cli.verbose, cli.log_dir.as_deref())? {
        info!("Logging to {}", log_path.display());
    }
    info!("Kako run started: {}", chrono::Local::now());

    let decoder = resolve_decoder(cli.ffmpeg.as_deref())?;
    info!("Using ffmpeg at {}", decoder.display());

    let stdin = io::stdin();
    let spawner = SidecarSpawner;
    let mut session = Session::new(stdin.lock(), io::stdout(), &spawner, &decoder);
    let summary = session.run()?;

    info!(
        "Kako run finished: {} extracted, {} cropped",
        summary.extracted,
        summary
            .cropped
            .map_or_else(|| "none".to_string(), |n| n.to_string())
    );
    Ok(summary)
}
