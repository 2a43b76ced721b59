//! Frame extraction and image cropping.

/// Batch cropping of a frames directory
pub mod batch;

/// Crop rectangle derivation from edge margins
pub mod crop;

/// Frame sampling through ffmpeg
pub mod frames;

pub use batch::{CropMode, CropReport, crop_images, list_images};
pub use crop::{CropMargins, PixelRect, Side, crop_rect_for};
pub use frames::{build_extract_command, extract_frames};
