//! Batch cropping of a directory of images.
//!
//! Every regular file in the input directory is decoded, cropped with the
//! shared [`CropMargins`], re-encoded as JPEG, and written below the
//! directory's `Crop` subfolder. The first failure aborts the batch; files
//! written before it are left in place.

use crate::config::{CROP_TEST_PREFIX, CROPPED_EXTENSION, CROPPED_PREFIX, crop_dir_for, test_dir_for};
use crate::error::{CoreError, CoreResult};
use crate::processing::crop::{CropMargins, PixelRect, crop_rect_for};

use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, ImageReader};
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

/// Selects between the one-image preview and the full batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CropMode {
    /// Crop only the first image into `Crop/Test/crop_test_<name>.jpg`.
    Test,
    /// Crop every image into `Crop/cropped_<name>.jpg`.
    Final,
}

impl CropMode {
    fn output_path(self, input_dir: &Path, stem: &str) -> PathBuf {
        match self {
            CropMode::Test => test_dir_for(input_dir)
                .join(format!("{CROP_TEST_PREFIX}{stem}.{CROPPED_EXTENSION}")),
            CropMode::Final => crop_dir_for(input_dir)
                .join(format!("{CROPPED_PREFIX}{stem}.{CROPPED_EXTENSION}")),
        }
    }
}

/// Files written by one call to [`crop_images`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CropReport {
    pub written: Vec<PathBuf>,
}

impl CropReport {
    pub fn count(&self) -> usize {
        self.written.len()
    }

    /// The preview image in test mode.
    pub fn first(&self) -> Option<&Path> {
        self.written.first().map(PathBuf::as_path)
    }
}

/// Lists the non-directory entries of `dir`, sorted by file name.
pub fn list_images(dir: &Path) -> CoreResult<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        if entry.file_type()?.is_dir() {
            continue;
        }
        files.push(entry.path());
    }
    files.sort();
    Ok(files)
}

/// Crops the images in `input_dir` by `margins`.
///
/// In [`CropMode::Test`] only the first image is processed and the call
/// returns as soon as it is written.
pub fn crop_images(margins: CropMargins, input_dir: &Path, mode: CropMode) -> CoreResult<CropReport> {
    let images = list_images(input_dir)?;
    log::info!(
        "Cropping {} image(s) in {} ({:?} mode, margins {})",
        images.len(),
        input_dir.display(),
        mode,
        margins
    );

    let mut report = CropReport::default();
    for image_path in &images {
        let output_path = crop_one(image_path, input_dir, margins, mode)?;
        report.written.push(output_path);

        if mode == CropMode::Test {
            break;
        }
    }

    log::info!("Wrote {} cropped image(s)", report.count());
    Ok(report)
}

fn crop_one(image_path: &Path, input_dir: &Path, margins: CropMargins, mode: CropMode) -> CoreResult<PathBuf> {
    let src = decode_image(image_path)?;

    let bounds = PixelRect::from_dimensions(src.width(), src.height());
    let rect = crop_rect_for(bounds, margins).inspect_err(|e| {
        log::error!("{}: {}", image_path.display(), e);
    })?;

    // crop_rect_for keeps the rectangle inside the image bounds, so every
    // coordinate is a non-negative u32.
    let cropped = src
        .crop_imm(
            rect.min_x as u32,
            rect.min_y as u32,
            rect.width() as u32,
            rect.height() as u32,
        )
        .to_rgb8();

    let stem = image_path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let output_path = mode.output_path(input_dir, &stem);

    if let Some(parent) = output_path.parent() {
        fs::create_dir_all(parent).inspect_err(|e| {
            log::error!("Failed to create output dir {}: {}", parent.display(), e);
        })?;
    }

    let mut writer = BufWriter::new(File::create(&output_path)?);
    cropped
        .write_with_encoder(JpegEncoder::new(&mut writer))
        .map_err(|e| CoreError::Io(io::Error::other(format!("{}: {}", output_path.display(), e))))?;
    writer.flush()?;

    log::debug!(
        "Cropped {} ({}x{} -> {}x{}) to {}",
        image_path.display(),
        bounds.width(),
        bounds.height(),
        rect.width(),
        rect.height(),
        output_path.display()
    );
    Ok(output_path)
}

fn decode_image(path: &Path) -> CoreResult<DynamicImage> {
    let reader = ImageReader::open(path)?.with_guessed_format()?;
    reader.decode().map_err(|e| {
        log::error!("Failed to decode {}: {}", path.display(), e);
        CoreError::DecodeFailed(format!("{}: {}", path.display(), e))
    })
}
