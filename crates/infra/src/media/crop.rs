//! Square avatar crop backed by the `image` crate

use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use linkpage_core::{CropArea, ImageTransform};
use linkpage_domain::constants::AVATAR_MAX_DIMENSION;
use linkpage_domain::{LinkpageError, Result};
use tracing::debug;

use crate::errors::InfraError;

const JPEG_QUALITY: u8 = 90;

/// Crops to a square, downsizes to at most `max_dimension` and re-encodes
/// as JPEG.
#[derive(Debug, Clone, Copy)]
pub struct SquareCropTransform {
    max_dimension: u32,
}

impl Default for SquareCropTransform {
    fn default() -> Self {
        Self { max_dimension: AVATAR_MAX_DIMENSION }
    }
}

impl SquareCropTransform {
    pub fn with_max_dimension(max_dimension: u32) -> Self {
        Self { max_dimension: max_dimension.max(1) }
    }
}

impl ImageTransform for SquareCropTransform {
    fn square_crop(&self, bytes: &[u8], area: Option<CropArea>) -> Result<Vec<u8>> {
        let source = image::load_from_memory(bytes).map_err(InfraError::from)?;
        let (x, y, side) = square_region(source.width(), source.height(), area)?;

        let mut cropped = source.crop_imm(x, y, side, side);
        if side > self.max_dimension {
            cropped =
                cropped.resize_exact(self.max_dimension, self.max_dimension, FilterType::Lanczos3);
        }

        // JPEG has no alpha channel
        let rgb = cropped.to_rgb8();
        let mut encoded = Vec::new();
        JpegEncoder::new_with_quality(&mut encoded, JPEG_QUALITY)
            .encode_image(&rgb)
            .map_err(InfraError::from)?;

        debug!(x, y, side, output_bytes = encoded.len(), "avatar cropped");
        Ok(encoded)
    }
}

/// Top-left corner and side of the square to keep.
///
/// A requested area is clamped to the image and squared on its shorter
/// edge; no area means the largest centered square.
fn square_region(width: u32, height: u32, area: Option<CropArea>) -> Result<(u32, u32, u32)> {
    if width == 0 || height == 0 {
        return Err(LinkpageError::InvalidInput("image has no pixels".into()));
    }

    let Some(area) = area else {
        let side = width.min(height);
        return Ok(((width - side) / 2, (height - side) / 2, side));
    };

    if area.x >= width || area.y >= height {
        return Err(LinkpageError::InvalidInput(format!(
            "crop origin ({}, {}) lies outside a {width}x{height} image",
            area.x, area.y
        )));
    }
    let side = area.width.min(area.height).min(width - area.x).min(height - area.y);
    if side == 0 {
        return Err(LinkpageError::InvalidInput("crop area is empty".into()));
    }
    Ok((area.x, area.y, side))
}
