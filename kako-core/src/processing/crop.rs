//! Margin-based crop rectangle derivation.
//!
//! Margins always describe pixels *removed* from an edge. The retained
//! rectangle is computed per image from that image's own bounds, so one set
//! of margins can be applied across frames of any size; frames too small for
//! the margins are rejected rather than silently clamped.

use crate::error::{CoreError, CoreResult};

use serde::Serialize;
use std::fmt;

/// One edge of an image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Side {
    Top,
    Bottom,
    Right,
    Left,
}

impl Side {
    /// Lowercase name used in user-facing messages.
    pub fn label(self) -> &'static str {
        match self {
            Side::Top => "top",
            Side::Bottom => "bottom",
            Side::Right => "right",
            Side::Left => "left",
        }
    }

    /// Capitalized name, as listed in the crop menu.
    pub fn name(self) -> &'static str {
        match self {
            Side::Top => "Top",
            Side::Bottom => "Bottom",
            Side::Right => "Right",
            Side::Left => "Left",
        }
    }
}

/// Pixels to remove from each edge of every image in a batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct CropMargins {
    pub top: u32,
    pub bottom: u32,
    pub right: u32,
    pub left: u32,
}

impl CropMargins {
    /// Margins in the order the "all sides" prompt asks for them.
    pub const fn new(top: u32, bottom: u32, right: u32, left: u32) -> Self {
        Self {
            top,
            bottom,
            right,
            left,
        }
    }

    /// Margins removing nothing.
    pub const fn none() -> Self {
        Self::new(0, 0, 0, 0)
    }

    /// Margins removing `pixels` from a single side.
    pub fn only(side: Side, pixels: u32) -> Self {
        let mut margins = Self::none();
        match side {
            Side::Top => margins.top = pixels,
            Side::Bottom => margins.bottom = pixels,
            Side::Right => margins.right = pixels,
            Side::Left => margins.left = pixels,
        }
        margins
    }

    /// Pretty JSON rendering used in debug logs.
    pub fn describe(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| self.to_string())
    }
}

impl fmt::Display for CropMargins {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{Top:{} Bottom:{} Right:{} Left:{}}}",
            self.top, self.bottom, self.right, self.left
        )
    }
}

/// Half-open pixel rectangle `[min_x, max_x) x [min_y, max_y)`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PixelRect {
    pub min_x: i64,
    pub min_y: i64,
    pub max_x: i64,
    pub max_y: i64,
}

impl PixelRect {
    pub const fn new(min_x: i64, min_y: i64, max_x: i64, max_y: i64) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// Bounds of a decoded image, which always start at the origin.
    pub fn from_dimensions(width: u32, height: u32) -> Self {
        Self::new(0, 0, i64::from(width), i64::from(height))
    }

    pub fn width(&self) -> i64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> i64 {
        self.max_y - self.min_y
    }

    pub fn is_empty(&self) -> bool {
        self.min_x >= self.max_x || self.min_y >= self.max_y
    }

    /// Largest rectangle contained in both; the zero rectangle when disjoint.
    pub fn intersect(&self, other: &PixelRect) -> PixelRect {
        let r = PixelRect::new(
            self.min_x.max(other.min_x),
            self.min_y.max(other.min_y),
            self.max_x.min(other.max_x),
            self.max_y.min(other.max_y),
        );
        if r.is_empty() { PixelRect::default() } else { r }
    }
}

impl fmt::Display for PixelRect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({},{})-({},{})",
            self.min_x, self.min_y, self.max_x, self.max_y
        )
    }
}

/// Computes the rectangle retained after removing `margins` from `bounds`.
///
/// Fails with [`CoreError::InvalidCrop`] when nothing would remain.
pub fn crop_rect_for(bounds: PixelRect, margins: CropMargins) -> CoreResult<PixelRect> {
    let wanted = PixelRect::new(
        bounds.min_x + i64::from(margins.left),
        bounds.min_y + i64::from(margins.top),
        bounds.max_x - i64::from(margins.right),
        bounds.max_y - i64::from(margins.bottom),
    );

    let result = wanted.intersect(&bounds);
    if result.is_empty() || result.width() <= 0 || result.height() <= 0 {
        return Err(CoreError::InvalidCrop {
            bounds,
            margins,
            result,
        });
    }
    Ok(result)
}
