// ============================================================================
// kako-core/src/external/ffmpeg_executor.rs
// ============================================================================
//
// FFMPEG EXECUTOR: FFmpeg Process Management and Abstraction
//
// This module provides abstractions for spawning and interacting with FFmpeg
// processes. Frame extraction is written against the `FfmpegSpawner` trait so
// tests can substitute a mock that records arguments and replays events.
//
// KEY COMPONENTS:
// - FfmpegProcess: Trait representing an active FFmpeg process
// - FfmpegSpawner: Trait for creating new FFmpeg processes
// - SidecarSpawner: Starts the command as built and parses stderr with
//   the ffmpeg-sidecar log parser

use crate::error::{CoreResult, command_start_error, command_wait_error};

use ffmpeg_sidecar::command::FfmpegCommand;
use ffmpeg_sidecar::event::FfmpegEvent;
use ffmpeg_sidecar::log_parser::FfmpegLogParser;
use std::io;
use std::process::{Child, Command, ExitStatus, Stdio};

// --- FFmpeg Execution Abstraction ---

/// Trait representing an active ffmpeg process instance.
pub trait FfmpegProcess {
    /// Processes events from the running command using a provided handler closure.
    fn handle_events<F>(&mut self, handler: F) -> CoreResult<()>
    where
        F: FnMut(FfmpegEvent) -> CoreResult<()>;

    /// Waits for the command to complete and returns its exit status.
    fn wait(&mut self) -> CoreResult<ExitStatus>;
}

/// Trait representing something that can spawn an FfmpegProcess.
pub trait FfmpegSpawner {
    type Process: FfmpegProcess;
    /// Spawns the ffmpeg command, consuming the command object.
    fn spawn(&self, cmd: FfmpegCommand) -> CoreResult<Self::Process>;
}

// --- Concrete Implementation using ffmpeg-sidecar ---

/// A spawned ffmpeg child whose stderr is parsed by the sidecar log parser.
///
/// The child is started from the plain `Command` so the argument list is
/// exactly what the caller built; `FfmpegCommand::spawn` would append `-n`.
pub struct SidecarProcess(Child);

impl FfmpegProcess for SidecarProcess {
    fn handle_events<F>(&mut self, mut handler: F) -> CoreResult<()>
    where
        F: FnMut(FfmpegEvent) -> CoreResult<()>,
    {
        let Some(stderr) = self.0.stderr.take() else {
            return Ok(());
        };
        let mut parser = FfmpegLogParser::new(stderr);
        loop {
            match parser.parse_next_event() {
                Ok(FfmpegEvent::LogEOF) => break,
                Ok(event) => handler(event)?,
                Err(e) if e.downcast_ref::<io::Error>().is_some() => {
                    log::error!("Failed to read ffmpeg output: {}", e);
                    return Err(command_start_error("ffmpeg (event stream)", e));
                }
                Err(e) => log::debug!("Unparsed ffmpeg output: {}", e),
            }
        }
        Ok(())
    }

    fn wait(&mut self) -> CoreResult<ExitStatus> {
        if let Some(mut stderr) = self.0.stderr.take() {
            io::copy(&mut stderr, &mut io::sink()).map_err(|e| command_wait_error("ffmpeg", e))?;
        }
        self.0.wait().map_err(|e| command_wait_error("ffmpeg", e))
    }
}

/// Concrete implementation of `FfmpegSpawner` using `ffmpeg-sidecar`.
#[derive(Debug, Clone, Default)]
pub struct SidecarSpawner;

impl FfmpegSpawner for SidecarSpawner {
    type Process = SidecarProcess;

    fn spawn(&self, cmd: FfmpegCommand) -> CoreResult<Self::Process> {
        let mut command = Command::from(cmd);
        command
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped());
        command
            .spawn()
            .map(SidecarProcess)
            .map_err(|e| command_start_error("ffmpeg", e))
    }
}
