//! rondo-pipeline: Pure compositing pipeline (sans-IO).
//!
//! Turns a source photo into the two rondo artifacts' in-memory forms:
//!
//! - [`ban_icon`]: circle-pad -> shrink -> square canvas -> prohibition
//!   glyph -> caption; an opaque icon ready for JPEG.
//! - [`circle_cutout`]: center-crop -> transparent circular cutout; the
//!   input the rotating-avatar pipeline feeds to the external rotator.
//! - [`frames::remask_frames`]: per-frame circular transparency
//!   reconstruction for the rotator's output.
//!
//! This crate has **no I/O dependencies** -- it operates on in-memory
//! byte slices and image buffers. Subprocess and filesystem interaction
//! live in `rondo-rotate` and the `rondo` CLI.

pub mod caption;
pub mod circle;
pub mod compose;
pub mod frames;
pub mod glyph;
pub mod types;

use ab_glyph::Font;
use image::DynamicImage;

pub use circle::{MaskStrategy, mask_to_circle};
pub use compose::compose_ban_icon;
pub use frames::{AnimatedSequence, FrameDisposal, SequenceFrame, remask_frames};
pub use glyph::GlyphGeometry;
pub use types::{ComposeConfig, PipelineError, RgbImage, RgbaImage};

/// Decode raw image bytes (PNG, JPEG, BMP, WebP).
///
/// # Errors
///
/// Returns [`PipelineError::EmptyInput`] if `bytes` is empty and
/// [`PipelineError::ImageDecode`] if the format is unrecognized or the
/// data is corrupt.
pub fn decode(bytes: &[u8]) -> Result<DynamicImage, PipelineError> {
    if bytes.is_empty() {
        return Err(PipelineError::EmptyInput);
    }
    Ok(image::load_from_memory(bytes)?)
}

/// Produce the banned icon for one photo.
///
/// Decodes `bytes`, neutralizes everything outside the inscribed circle
/// against the background color, and composes the glyph and caption.
///
/// # Errors
///
/// Returns [`PipelineError`] if the input cannot be decoded. Caption
/// failures are non-fatal: a `None` font simply skips the caption.
pub fn ban_icon(
    bytes: &[u8],
    font: Option<&impl Font>,
    caption: &str,
    config: &ComposeConfig,
) -> Result<RgbImage, PipelineError> {
    let source = decode(bytes)?;
    let circled = mask_to_circle(&source, MaskStrategy::CenterPad).into_rgb8();
    Ok(compose_ban_icon(&circled, font, caption, config))
}

/// Produce the transparent circular cutout for one photo.
///
/// Decodes `bytes` and center-crops it to a square circular cutout with
/// zero alpha outside the circle, ready for the rotation pipeline.
///
/// # Errors
///
/// Returns [`PipelineError`] if the input cannot be decoded.
pub fn circle_cutout(bytes: &[u8]) -> Result<RgbaImage, PipelineError> {
    let source = decode(bytes)?;
    Ok(mask_to_circle(&source, MaskStrategy::CenterCrop).into_rgba8())
}
