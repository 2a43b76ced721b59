// ============================================================================
// kako-core/src/external/mod.rs
// ============================================================================
//
// EXTERNAL TOOLS: Interactions with the ffmpeg Binary
//
// This module encapsulates everything kako-core knows about ffmpeg: where the
// bundled binary comes from, how it is materialized on disk, and how it is
// spawned. Spawning goes through traits so the frame extractor can be tested
// with a mock process.
//
// KEY COMPONENTS:
// - Bundled payload lookup keyed by (OS, architecture)
// - Content-addressed installation into the user cache directory
// - Traits for ffmpeg process interactions (FfmpegSpawner, FfmpegProcess)
// - Concrete implementation using the ffmpeg-sidecar crate

// ============================================================================
// SUBMODULES
// ============================================================================

/// Bundled ffmpeg payload lookup
pub mod embedded;

/// Contains traits and implementations for executing ffmpeg commands
pub mod ffmpeg_executor;

/// Installs the bundled binary into the user cache
pub mod locator;

/// Mock spawner for tests
pub mod mocks;

// ============================================================================
// RE-EXPORTS
// ============================================================================

pub use embedded::{DecoderPayload, current_payload, payload_for};
pub use ffmpeg_executor::{FfmpegProcess, FfmpegSpawner, SidecarProcess, SidecarSpawner};
pub use locator::{cached_decoder_path, ensure_decoder, locate_decoder};
