// ============================================================================
// kako-core/src/config.rs
// ============================================================================
//
// CONFIGURATION: Constants and Output Layout
//
// Kako has no configuration file. The values below fix the naming of every
// file and directory the tool produces, and `OutputLayout` derives the
// concrete directories for one input video.

use crate::source::SourceFile;

use std::path::{Path, PathBuf};

/// Highest accepted extraction rate, in frames per second of video time.
pub const MAX_FRAME_RATE: u32 = 200;

/// Extension a source video must carry (compared case-sensitively).
pub const VIDEO_EXTENSION: &str = "mp4";

/// Directory created next to the source video to hold extracted frames.
pub const OUTPUT_DIR_NAME: &str = "Kako";

/// Subdirectory of the frames directory receiving cropped images.
pub const CROP_DIR_NAME: &str = "Crop";

/// Subdirectory of the crop directory receiving the preview crop.
pub const TEST_DIR_NAME: &str = "Test";

/// ffmpeg output pattern for extracted frames.
pub const FRAME_FILE_PATTERN: &str = "frame_%06d.png";

pub const CROP_TEST_PREFIX: &str = "crop_test_";
pub const CROPPED_PREFIX: &str = "cropped_";
pub const CROPPED_EXTENSION: &str = "jpg";

/// Namespace under the user cache directory.
pub const APP_NAMESPACE: &str = "kako";

/// Number of hex characters of the payload hash used in the cached file name.
pub const HASH_PREFIX_LEN: usize = 16;

/// Directories produced for a single source video.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputLayout {
    pub frames_dir: PathBuf,
    pub crop_dir: PathBuf,
    pub test_dir: PathBuf,
}

impl OutputLayout {
    /// Layout rooted at `<parent of source>/Kako`.
    pub fn for_source(source: &SourceFile) -> Self {
        Self::for_frames_dir(source.parent_dir.join(OUTPUT_DIR_NAME))
    }

    pub fn for_frames_dir(frames_dir: impl Into<PathBuf>) -> Self {
        let frames_dir = frames_dir.into();
        let crop_dir = crop_dir_for(&frames_dir);
        let test_dir = crop_dir.join(TEST_DIR_NAME);
        Self {
            frames_dir,
            crop_dir,
            test_dir,
        }
    }
}

/// Final crop destination for a directory of images.
pub fn crop_dir_for(input_dir: &Path) -> PathBuf {
    input_dir.join(CROP_DIR_NAME)
}

/// Preview crop destination for a directory of images.
pub fn test_dir_for(input_dir: &Path) -> PathBuf {
    crop_dir_for(input_dir).join(TEST_DIR_NAME)
}
