// ============================================================================
// kako-cli/src/error.rs
// ============================================================================
//
// CLI ERROR HANDLING: Error types for the interactive front end
//
// Validation problems with a single answer are `PromptError`s and never leave
// the prompt loop. Everything here is fatal for the run: main prints it and
// exits with status 1.

use kako_core::CoreError;

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Fatal errors ending an interactive run.
#[derive(Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("Terminal I/O failed: {0}")]
    Terminal(#[from] io::Error),

    #[error("Input closed before the question was answered")]
    InputClosed,

    #[error("ffmpeg override '{}' is not a file", .0.display())]
    DecoderOverride(PathBuf),

    #[error("No images found to crop in {}", .0.display())]
    NothingToCrop(PathBuf),

    #[error("Failed to initialise logging: {0}")]
    Logging(#[from] fern::InitError),
}

/// Type alias for CLI results.
pub type CliResult<T> = Result<T, CliError>;
