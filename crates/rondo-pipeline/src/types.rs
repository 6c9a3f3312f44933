//! Shared types for the rondo compositing pipeline.

use serde::{Deserialize, Serialize};

/// Re-export `GrayImage` so downstream crates can reference masks
/// without depending on `image` directly.
pub use image::GrayImage;

/// Re-export `RgbImage` for opaque pipeline outputs.
pub use image::RgbImage;

/// Re-export `RgbaImage` for transparency-capable pipeline data.
pub use image::RgbaImage;

/// Opaque background color for padded circle cutouts and icon canvases.
pub const BACKGROUND: image::Rgb<u8> = image::Rgb([255, 255, 255]);

/// Alert color used for the prohibition ring and diagonal bar.
pub const ALERT: image::Rgb<u8> = image::Rgb([255, 0, 0]);

/// Caption text color.
pub const CAPTION_COLOR: image::Rgb<u8> = image::Rgb([0, 0, 0]);

/// Geometry configuration for the ban-glyph composer.
///
/// All ratios are fractions of the square canvas side. The defaults are
/// the canonical values of the ban-icon design; they are fields rather
/// than inline literals so the geometry in [`crate::glyph`] stays
/// independently testable against varied ratios.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComposeConfig {
    /// Scale factor applied to the subject before placement. The
    /// remaining margin makes room for the glyph and the caption.
    pub shrink_factor: f64,

    /// Vertical offset of the subject from the canvas top, as a
    /// fraction of the canvas side. The subject is deliberately not
    /// centered vertically so the caption band below stays wide.
    pub top_margin_ratio: f64,

    /// Extra ring diameter beyond the subject's short side, as a
    /// fraction of the canvas side. Keeps the subject fully enclosed.
    pub ring_padding_ratio: f64,

    /// Ring stroke width as a fraction of the canvas side.
    pub stroke_ratio: f64,

    /// Lower bound on the stroke width in pixels, so the glyph stays
    /// visible on tiny canvases.
    pub min_stroke_px: u32,

    /// Caption font size as a fraction of the canvas side.
    pub caption_ratio: f64,
}

impl Default for ComposeConfig {
    fn default() -> Self {
        Self {
            shrink_factor: 0.8,
            top_margin_ratio: 0.02,
            ring_padding_ratio: 0.02,
            stroke_ratio: 0.06,
            min_stroke_px: 2,
            caption_ratio: 0.10,
        }
    }
}

/// Errors that can occur during pipeline processing.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// Failed to decode the input image.
    #[error("failed to decode image: {0}")]
    ImageDecode(#[from] image::ImageError),

    /// The input image bytes were empty.
    #[error("input image data is empty")]
    EmptyInput,

    /// An animated sequence was built from frames of differing sizes.
    #[error("frame dimensions differ within one sequence: {0}x{1} vs {2}x{3}")]
    FrameDimensionMismatch(u32, u32, u32, u32),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compose_config_defaults_match_design() {
        let config = ComposeConfig::default();
        assert!((config.shrink_factor - 0.8).abs() < f64::EPSILON);
        assert!((config.top_margin_ratio - 0.02).abs() < f64::EPSILON);
        assert!((config.ring_padding_ratio - 0.02).abs() < f64::EPSILON);
        assert!((config.stroke_ratio - 0.06).abs() < f64::EPSILON);
        assert_eq!(config.min_stroke_px, 2);
        assert!((config.caption_ratio - 0.10).abs() < f64::EPSILON);
    }

    #[test]
    #[allow(clippy::unwrap_used)]
    fn compose_config_serde_round_trip() {
        let config = ComposeConfig {
            shrink_factor: 0.5,
            top_margin_ratio: 0.1,
            ring_padding_ratio: 0.05,
            stroke_ratio: 0.08,
            min_stroke_px: 4,
            caption_ratio: 0.2,
        };
        let json = serde_json::to_string(&config).unwrap();
        let deserialized: ComposeConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, deserialized);
    }

    #[test]
    fn error_empty_input_display() {
        let err = PipelineError::EmptyInput;
        assert_eq!(err.to_string(), "input image data is empty");
    }

    #[test]
    fn error_dimension_mismatch_display() {
        let err = PipelineError::FrameDimensionMismatch(10, 10, 20, 10);
        assert_eq!(
            err.to_string(),
            "frame dimensions differ within one sequence: 10x10 vs 20x10",
        );
    }
}
