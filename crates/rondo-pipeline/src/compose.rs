//! Ban-glyph composer: shrink the circled subject, place it on a
//! square canvas, stroke the prohibition glyph over it, and caption
//! the band below.
//!
//! The input is expected to come from
//! [`MaskStrategy::CenterPad`](crate::circle::MaskStrategy::CenterPad),
//! i.e. a rectangular image whose out-of-circle area is already
//! neutralized to the background color.

use ab_glyph::Font;
use image::imageops::{self, FilterType};

use crate::caption::draw_caption;
use crate::glyph::{GlyphGeometry, draw_prohibition_glyph};
use crate::types::{ALERT, BACKGROUND, ComposeConfig, RgbImage};

/// Compose the banned icon for an already-circled subject.
///
/// The canvas is square with side `max(width, height)` of the input,
/// guaranteeing the shrunk subject, the glyph, and the caption all fit
/// without clipping for non-square originals. The output carries no
/// alpha channel and is suitable for a lossy static format.
///
/// A missing font (`None`) or a failed caption layout suppresses the
/// caption only; the glyph canvas is still returned.
#[must_use = "returns the composed icon"]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn compose_ban_icon(
    circled: &RgbImage,
    font: Option<&impl Font>,
    caption: &str,
    config: &ComposeConfig,
) -> RgbImage {
    let (width, height) = circled.dimensions();

    let subject_w = ((f64::from(width) * config.shrink_factor) as u32).max(1);
    let subject_h = ((f64::from(height) * config.shrink_factor) as u32).max(1);
    let subject = imageops::resize(circled, subject_w, subject_h, FilterType::Lanczos3);

    let side = width.max(height);
    let mut canvas = RgbImage::from_pixel(side, side, BACKGROUND);

    let paste_x = (side - subject_w) / 2;
    let paste_y = (f64::from(side) * config.top_margin_ratio) as u32;
    imageops::replace(
        &mut canvas,
        &subject,
        i64::from(paste_x),
        i64::from(paste_y),
    );

    let geometry = GlyphGeometry::new(side, subject_w, subject_h, paste_x, paste_y, config);
    draw_prohibition_glyph(&mut canvas, &geometry, ALERT);

    if let Some(font) = font {
        draw_caption(&mut canvas, font, caption, geometry.ring_bottom(), config);
    }

    canvas
}

#[cfg(test)]
mod tests {
    use super::*;
    use ab_glyph::FontRef;
    use image::Rgb;

    const SUBJECT: Rgb<u8> = Rgb([40, 40, 40]);

    #[test]
    fn portrait_scenario_matches_reference_layout() {
        // 400x600 circled input -> 600x600 canvas, 320x480 subject
        // pasted at (140, 12).
        let circled = RgbImage::from_pixel(400, 600, SUBJECT);
        let icon = compose_ban_icon(&circled, None::<&FontRef<'_>>, "", &ComposeConfig::default());

        assert_eq!(icon.dimensions(), (600, 600));
        // Subject's top-left corner.
        assert_eq!(*icon.get_pixel(140, 12), SUBJECT);
        // One pixel left of the subject: untouched canvas.
        assert_eq!(*icon.get_pixel(139, 12), BACKGROUND);
        // Above the subject: untouched canvas.
        assert_eq!(*icon.get_pixel(140, 11), BACKGROUND);
    }

    #[test]
    fn landscape_scenario_is_symmetric() {
        let circled = RgbImage::from_pixel(600, 400, SUBJECT);
        let icon = compose_ban_icon(&circled, None::<&FontRef<'_>>, "", &ComposeConfig::default());
        assert_eq!(icon.dimensions(), (600, 600));
        // 480-wide subject centered: paste_x = 60.
        assert_eq!(*icon.get_pixel(60, 12), SUBJECT);
        assert_eq!(*icon.get_pixel(59, 12), BACKGROUND);
    }

    #[test]
    fn glyph_ring_is_painted_in_alert_color() {
        let circled = RgbImage::from_pixel(400, 600, SUBJECT);
        let icon = compose_ban_icon(&circled, None::<&FontRef<'_>>, "", &ComposeConfig::default());

        // Ring: center (300, 252), outer radius 166, stroke 36. The
        // rightmost band pixel sits near x = 300 + 166.
        assert_eq!(*icon.get_pixel(460, 252), ALERT);
        // Bar passes through the glyph center.
        assert_eq!(*icon.get_pixel(300, 252), ALERT);
    }

    #[test]
    fn square_input_keeps_side() {
        let circled = RgbImage::from_pixel(300, 300, SUBJECT);
        let icon = compose_ban_icon(&circled, None::<&FontRef<'_>>, "", &ComposeConfig::default());
        assert_eq!(icon.dimensions(), (300, 300));
    }

    #[test]
    fn tiny_input_does_not_degenerate() {
        let circled = RgbImage::from_pixel(1, 1, SUBJECT);
        let icon = compose_ban_icon(&circled, None::<&FontRef<'_>>, "", &ComposeConfig::default());
        assert_eq!(icon.dimensions(), (1, 1));
    }
}
