//! Circular masker: cut a rectangular image down to a circle.
//!
//! Two strategies exist because the two downstream consumers want
//! different shapes of output:
//!
//! - [`MaskStrategy::CenterPad`] keeps the original width x height and
//!   fills everything outside the inscribed circle with opaque white.
//!   The ban-glyph composer expects this rectangular, pre-neutralized
//!   input.
//! - [`MaskStrategy::CenterCrop`] first crops to a centered square and
//!   leaves everything outside the circle fully transparent, because
//!   the rotating-avatar pipeline must carry real alpha.
//!
//! Both strategies square the working region before building the mask,
//! so the cutout is a true inscribed circle regardless of the input
//! aspect ratio.

use image::{DynamicImage, Luma, Rgb, Rgba};

use crate::types::{BACKGROUND, GrayImage, RgbImage, RgbaImage};

/// How the circular cutout is framed and what fills the outside.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaskStrategy {
    /// Keep the original canvas; fill outside the circle with opaque
    /// white.
    CenterPad,
    /// Crop to a centered square; leave outside the circle transparent.
    CenterCrop,
}

/// Cut `image` down to a centered circle using the given strategy.
///
/// `CenterPad` returns an opaque `Rgb8` image of the original
/// dimensions; `CenterCrop` returns a square `Rgba8` image of side
/// `min(width, height)` with zero alpha outside the inscribed circle.
#[must_use = "returns the masked image"]
pub fn mask_to_circle(image: &DynamicImage, strategy: MaskStrategy) -> DynamicImage {
    let rgba = image.to_rgba8();
    match strategy {
        MaskStrategy::CenterPad => DynamicImage::ImageRgb8(center_pad(&rgba)),
        MaskStrategy::CenterCrop => DynamicImage::ImageRgba8(center_crop(&rgba)),
    }
}

/// Build a coverage mask holding the largest circle that fits a
/// `width` x `height` region: diameter `min(width, height)`, centered.
///
/// Pixels are sampled at their centers: 255 inside the circle, 0
/// outside. Constraining the diameter to the short side keeps the
/// shape a true circle even when the region itself is not square.
#[must_use = "returns the coverage mask"]
pub fn inscribed_circle_mask(width: u32, height: u32) -> GrayImage {
    let radius = f64::from(width.min(height)) / 2.0;
    let cx = f64::from(width) / 2.0;
    let cy = f64::from(height) / 2.0;
    GrayImage::from_fn(width, height, |x, y| {
        let dx = f64::from(x) + 0.5 - cx;
        let dy = f64::from(y) + 0.5 - cy;
        if dx.hypot(dy) <= radius {
            Luma([255])
        } else {
            Luma([0])
        }
    })
}

/// Composite `source` over an opaque white canvas of the same size,
/// with coverage limited to the inscribed circle.
fn center_pad(source: &RgbaImage) -> RgbImage {
    let mask = inscribed_circle_mask(source.width(), source.height());
    composite_over_background(source, &mask, BACKGROUND)
}

/// Crop `source` to a centered square and zero the alpha of every
/// pixel outside the inscribed circle.
fn center_crop(source: &RgbaImage) -> RgbaImage {
    let (width, height) = source.dimensions();
    let side = width.min(height);
    let left = (width - side) / 2;
    let top = (height - side) / 2;
    let square = image::imageops::crop_imm(source, left, top, side, side).to_image();

    let mask = inscribed_circle_mask(side, side);
    RgbaImage::from_fn(side, side, |x, y| {
        let coverage = mask.get_pixel(x, y).0[0];
        if coverage == 0 {
            Rgba([0, 0, 0, 0])
        } else {
            let Rgba([r, g, b, a]) = *square.get_pixel(x, y);
            Rgba([r, g, b, scale_alpha(a, coverage)])
        }
    })
}

/// Blend `source` over a solid `background` using `mask` as per-pixel
/// coverage, combined with the source's own alpha.
///
/// The mask must match the source dimensions; mismatched pixels read as
/// zero coverage.
#[allow(clippy::cast_possible_truncation)]
fn composite_over_background(
    source: &RgbaImage,
    mask: &GrayImage,
    background: Rgb<u8>,
) -> RgbImage {
    RgbImage::from_fn(source.width(), source.height(), |x, y| {
        let coverage = mask
            .get_pixel_checked(x, y)
            .map_or(0, |luma| luma.0[0]);
        let Rgba([r, g, b, a]) = *source.get_pixel(x, y);
        let alpha = u16::from(scale_alpha(a, coverage));
        let inverse = 255 - alpha;
        let blend = |fg: u8, bg: u8| -> u8 {
            let value = (u16::from(fg) * alpha + u16::from(bg) * inverse + 127) / 255;
            value.min(255) as u8
        };
        Rgb([
            blend(r, background.0[0]),
            blend(g, background.0[1]),
            blend(b, background.0[2]),
        ])
    })
}

/// Multiply an alpha value by a coverage value, both in 0..=255.
#[allow(clippy::cast_possible_truncation)]
fn scale_alpha(alpha: u8, coverage: u8) -> u8 {
    let product = (u16::from(alpha) * u16::from(coverage) + 127) / 255;
    product.min(255) as u8
}
