// ============================================================================
// kako-core/src/error.rs
// ============================================================================
//
// ERROR HANDLING: Core Error Types and Helpers
//
// Every fallible operation in kako-core returns `CoreResult<T>`. Batch
// operations stop at the first error and surface it unchanged; the CLI turns
// these into human-readable messages.

use crate::processing::crop::{CropMargins, PixelRect};

use std::io;
use std::process::ExitStatus;
use thiserror::Error;

/// Errors produced by the core library.
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("ffmpeg is not bundled for this platform: {os}/{arch}")]
    UnsupportedPlatform { os: String, arch: String },

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Decode failed: {0}")]
    DecodeFailed(String),

    #[error("Invalid crop: src={bounds} margins={margins} result={result}")]
    InvalidCrop {
        bounds: PixelRect,
        margins: CropMargins,
        result: PixelRect,
    },

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Path error: {0}")]
    PathError(String),
}

/// Result type for kako-core operations.
pub type CoreResult<T> = std::result::Result<T, CoreError>;

/// Builds the error reported when an external command cannot be started.
pub fn command_start_error(cmd_name: &str, err: impl std::fmt::Display) -> CoreError {
    CoreError::DecodeFailed(format!("{cmd_name} failed to start: {err}"))
}

/// Builds the error reported when an external command exits unsuccessfully.
///
/// The captured diagnostics are preferred; the exit status is only used when
/// the command produced no diagnostic text.
pub fn command_failed_error(cmd_name: &str, status: ExitStatus, diagnostics: &str) -> CoreError {
    let diagnostics = diagnostics.trim();
    if diagnostics.is_empty() {
        CoreError::DecodeFailed(format!("{cmd_name} failed: {status}"))
    } else {
        CoreError::DecodeFailed(format!("{cmd_name} failed: {diagnostics}"))
    }
}

/// Builds the error reported when waiting on an external command fails.
pub fn command_wait_error(cmd_name: &str, err: io::Error) -> CoreError {
    CoreError::DecodeFailed(format!("{cmd_name} could not be awaited: {err}"))
}
