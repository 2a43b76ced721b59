//! Frame sampling through the external ffmpeg binary.
//!
//! One ffmpeg invocation writes `frame_000001.png`, `frame_000002.png`, ...
//! into the output directory at the requested rate.

use crate::config::FRAME_FILE_PATTERN;
use crate::error::{CoreError, CoreResult, command_failed_error};
use crate::external::{FfmpegProcess, FfmpegSpawner};
use crate::utils::count_files;

use ffmpeg_sidecar::command::FfmpegCommand;
use ffmpeg_sidecar::event::FfmpegEvent;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Builds the ffmpeg invocation for sampling `input_file` at `frame_rate`.
///
/// The arguments after the binary are exactly, in order:
/// `-hide_banner -loglevel error -i <input> -vf fps=<rate> -vsync vfr -start_number 1 <pattern>`.
/// The command is wrapped with `FfmpegCommand::from` so no default log level
/// is prepended.
pub fn build_extract_command(
    decoder_path: &Path,
    frame_rate: f64,
    output_dir: &Path,
    input_file: &Path,
) -> FfmpegCommand {
    let pattern = output_dir.join(FRAME_FILE_PATTERN);

    let mut cmd = Command::new(decoder_path);
    cmd.args(["-hide_banner", "-loglevel", "error", "-i"])
        .arg(input_file)
        .arg("-vf")
        .arg(format!("fps={frame_rate}"))
        .args(["-vsync", "vfr", "-start_number", "1"])
        .arg(&pattern);
    FfmpegCommand::from(cmd)
}

/// Samples frames from `input_file` into `output_dir` and returns the number
/// of files the directory holds afterwards.
///
/// Fails with [`CoreError::InvalidArgument`] for empty paths or a
/// non-positive rate, and with [`CoreError::DecodeFailed`] when ffmpeg cannot
/// be started or exits unsuccessfully.
pub fn extract_frames<S: FfmpegSpawner>(
    spawner: &S,
    decoder_path: &Path,
    frame_rate: f64,
    output_dir: &Path,
    input_file: &Path,
) -> CoreResult<usize> {
    let decoder_path = required_path("decoder path", decoder_path)?;
    let input_file = required_path("input file", input_file)?;
    if !frame_rate.is_finite() || frame_rate <= 0.0 {
        return Err(CoreError::InvalidArgument(format!(
            "frame rate must be > 0 (got {frame_rate})"
        )));
    }
    let output_dir = required_path("output directory", output_dir)?;

    fs::create_dir_all(&output_dir).inspect_err(|e| {
        log::error!("Failed to create {}: {}", output_dir.display(), e);
    })?;

    let cmd = build_extract_command(&decoder_path, frame_rate, &output_dir, &input_file);
    log::debug!("Running frame extraction command: {:?}", cmd);

    let mut process = spawner.spawn(cmd)?;

    let mut diagnostics = String::new();
    process.handle_events(|event| {
        match event {
            FfmpegEvent::Log(_, line) | FfmpegEvent::Error(line) => {
                log::debug!("ffmpeg: {}", line);
                diagnostics.push_str(&line);
                diagnostics.push('\n');
            }
            _ => {}
        }
        Ok(())
    })?;

    let status = process.wait()?;
    if !status.success() {
        log::error!("Frame extraction failed: {}", status);
        return Err(command_failed_error("ffmpeg", status, &diagnostics));
    }

    let frames = count_files(&output_dir)?;
    log::info!(
        "Extracted frames from {} into {} ({} file(s))",
        input_file.display(),
        output_dir.display(),
        frames
    );
    Ok(frames)
}

/// Trims surrounding whitespace and rejects empty paths.
fn required_path(label: &str, path: &Path) -> CoreResult<PathBuf> {
    let text = path.to_string_lossy();
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(CoreError::InvalidArgument(format!("{label} is required")));
    }
    Ok(PathBuf::from(trimmed))
}
