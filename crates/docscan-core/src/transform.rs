use std::fmt;

use image::imageops::{self, FilterType};
use image::{Rgb, RgbImage};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::consts::{TRANSFORM_BACKGROUND, TRANSFORM_BORDER_WIDTH, TRANSFORM_MARGIN_FRACTION};
use crate::error::{Result, ScanError};
use crate::raster::RasterImage;

/// Produces the "processed" image from a rendered one.
pub trait DocumentTransform: Send + Sync {
    fn apply(&self, input: &RasterImage) -> Result<RasterImage>;

    fn name(&self) -> &'static str;
}

/// Returns the input unchanged.
pub struct PassThrough;

impl DocumentTransform for PassThrough {
    fn apply(&self, input: &RasterImage) -> Result<RasterImage> {
        Ok(input.clone())
    }

    fn name(&self) -> &'static str {
        "pass-through"
    }
}

/// Cosmetic stand-in for perspective correction.
///
/// Crops a margin (10% of the width) off every side, scales the remainder
/// onto a light background inset by half a margin, and outlines it with a
/// thin black border. No edge or corner detection is performed.
pub struct SimulatedPerspective;

impl DocumentTransform for SimulatedPerspective {
    fn apply(&self, input: &RasterImage) -> Result<RasterImage> {
        let (w, h) = input.dimensions();
        let margin = w as f32 * TRANSFORM_MARGIN_FRACTION;

        let src_offset = margin.round() as u32;
        let src_w = w.saturating_sub(src_offset * 2);
        let src_h = h.saturating_sub(src_offset * 2);

        let dst_offset = (margin / 2.0).round() as u32;
        let dst_w = (w as f32 - margin).round() as u32;
        let dst_h = (h as f32 - margin).round() as u32;

        if src_w == 0 || src_h == 0 || dst_w == 0 || dst_h == 0 {
            return Err(ScanError::InvalidDimensions {
                width: w,
                height: h,
            });
        }

        let region = imageops::crop_imm(&input.pixels, src_offset, src_offset, src_w, src_h)
            .to_image();
        let scaled = imageops::resize(&region, dst_w, dst_h, FilterType::Triangle);

        let mut canvas = RgbImage::from_pixel(w, h, Rgb(TRANSFORM_BACKGROUND));
        imageops::overlay(&mut canvas, &scaled, dst_offset as i64, dst_offset as i64);
        stroke_rect(
            &mut canvas,
            dst_offset,
            dst_offset,
            dst_w,
            dst_h,
            TRANSFORM_BORDER_WIDTH,
        );

        debug!(width = w, height = h, margin, "Applied simulated perspective correction");
        Ok(RasterImage::new(canvas))
    }

    fn name(&self) -> &'static str {
        "simulated-perspective"
    }
}

/// Which transform the upload flow applies.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TransformKind {
    #[default]
    SimulatedPerspective,
    PassThrough,
}

impl TransformKind {
    pub fn build(&self) -> Box<dyn DocumentTransform> {
        match self {
            Self::SimulatedPerspective => Box::new(SimulatedPerspective),
            Self::PassThrough => Box::new(PassThrough),
        }
    }
}

impl fmt::Display for TransformKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SimulatedPerspective => write!(f, "Simulated perspective"),
            Self::PassThrough => write!(f, "Pass-through"),
        }
    }
}

/// Draw a black outline centred on the edges of the given rectangle.
fn stroke_rect(canvas: &mut RgbImage, x: u32, y: u32, w: u32, h: u32, thickness: u32) {
    let black = Rgb([0, 0, 0]);
    let half = thickness / 2;
    let (cw, ch) = canvas.dimensions();

    let mut paint = |px: i64, py: i64| {
        if px >= 0 && py >= 0 && (px as u32) < cw && (py as u32) < ch {
            canvas.put_pixel(px as u32, py as u32, black);
        }
    };

    let left = x as i64 - half as i64;
    let top = y as i64 - half as i64;
    let right = (x + w) as i64 - half as i64;
    let bottom = (y + h) as i64 - half as i64;

    for t in 0..thickness as i64 {
        for px in left..=right + thickness as i64 - 1 {
            paint(px, top + t);
            paint(px, bottom + t);
        }
        for py in top..=bottom + thickness as i64 - 1 {
            paint(left + t, py);
            paint(right + t, py);
        }
    }
}
