//! Caption rendering below the prohibition glyph.
//!
//! The caption is decoration: when no usable font is available, or the
//! band between the ring and the canvas bottom has collapsed, the
//! caption is skipped and the composition is returned without it.

use ab_glyph::{Font, PxScale};
use image::RgbImage;
use imageproc::drawing::{draw_text_mut, text_size};

use crate::types::{CAPTION_COLOR, ComposeConfig};

/// Draw `text` centered horizontally, vertically centered within the
/// band from `band_top` down to the canvas bottom edge.
///
/// The font size is `caption_ratio` of the canvas side. Returns `true`
/// when the caption was drawn, `false` when it was skipped because the
/// band or the font size degenerated to nothing.
#[allow(clippy::cast_possible_truncation)]
pub fn draw_caption(
    canvas: &mut RgbImage,
    font: &impl Font,
    text: &str,
    band_top: f64,
    config: &ComposeConfig,
) -> bool {
    let side = f64::from(canvas.width());
    let band_height = side - band_top;
    let font_size = (side * config.caption_ratio).trunc();
    if band_height <= 0.0 || font_size < 1.0 || text.is_empty() {
        return false;
    }

    let scale = PxScale::from(font_size as f32);
    let (text_w, text_h) = text_size(scale, font, text);

    let text_x = (side - f64::from(text_w)) / 2.0;
    let text_y = band_top + (band_height - f64::from(text_h)) / 2.0;

    draw_text_mut(
        canvas,
        CAPTION_COLOR,
        text_x.round() as i32,
        text_y.round() as i32,
        scale,
        font,
        text,
    );
    true
}
