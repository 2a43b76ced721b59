//! Core library for extracting frames from a video with ffmpeg and cropping
//! the resulting images by fixed pixel margins.
//!
//! ## Usage Example
//!
//! ```rust,no_run
//! use kako_core::{CropMargins, CropMode, SidecarSpawner, SourceFile, OutputLayout};
//!
//! let decoder = kako_core::locate_decoder().unwrap();
//! let source = SourceFile::from_path("/videos/clip.mp4").unwrap();
//! let layout = OutputLayout::for_source(&source);
//!
//! let frames = kako_core::extract_frames(
//!     &SidecarSpawner,
//!     &decoder,
//!     10.0,
//!     &layout.frames_dir,
//!     &source.path,
//! ).unwrap();
//! println!("{frames} frames extracted");
//!
//! let margins = CropMargins::new(10, 10, 0, 0);
//! let preview = kako_core::crop_images(margins, &layout.frames_dir, CropMode::Test).unwrap();
//! println!("preview written to {:?}", preview.first());
//! ```

pub mod config;
pub mod error;
pub mod external;
pub mod processing;
pub mod source;
pub mod utils;

// Re-exports for public API
pub use config::{MAX_FRAME_RATE, OutputLayout};
pub use error::{CoreError, CoreResult};
pub use external::{FfmpegSpawner, SidecarSpawner, ensure_decoder, locate_decoder};
pub use processing::{
    CropMargins, CropMode, CropReport, PixelRect, Side, crop_images, crop_rect_for, extract_frames,
};
pub use source::SourceFile;
pub use utils::count_files;
