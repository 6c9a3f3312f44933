//! Prohibition glyph geometry and rasterization.
//!
//! The glyph is a ring plus a 45-degree diagonal bar, both stroked in
//! the alert color. All measurements derive from the canvas side and
//! the placed subject via [`crate::types::ComposeConfig`] ratios, so
//! the same math holds for any canvas size.

use image::{Rgb, RgbImage};

use crate::types::ComposeConfig;

/// Derived measurements for one glyph, computed fresh per composition.
///
/// The ring strokes inward from `outer_radius`: the painted band covers
/// `outer_radius - stroke_width ..= outer_radius`. The diagonal bar's
/// half-length equals [`inner_radius`](Self::inner_radius), keeping the
/// bar's visible extent within the ring's inner edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlyphGeometry {
    /// Glyph center, equal to the placed subject's center.
    pub center_x: f64,
    /// Glyph center, equal to the placed subject's center.
    pub center_y: f64,
    /// Outer radius of the ring.
    pub outer_radius: f64,
    /// Stroke width shared by the ring and the bar.
    pub stroke_width: f64,
}

impl GlyphGeometry {
    /// Compute the glyph for a subject of `subject_w` x `subject_h`
    /// pasted at (`paste_x`, `paste_y`) on a square canvas of
    /// `canvas_side`.
    ///
    /// The ring diameter is the subject's short side plus
    /// `ring_padding_ratio` of the canvas, guaranteeing the subject's
    /// bounding circle is fully enclosed.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn new(
        canvas_side: u32,
        subject_w: u32,
        subject_h: u32,
        paste_x: u32,
        paste_y: u32,
        config: &ComposeConfig,
    ) -> Self {
        let center_x = f64::from(paste_x + subject_w / 2);
        let center_y = f64::from(paste_y + subject_h / 2);

        let padding = (f64::from(canvas_side) * config.ring_padding_ratio) as u32;
        let diameter = subject_w.min(subject_h) + padding;
        let outer_radius = f64::from(diameter / 2);

        let stroke = (f64::from(canvas_side) * config.stroke_ratio) as u32;
        let stroke_width = f64::from(stroke.max(config.min_stroke_px));

        Self {
            center_x,
            center_y,
            outer_radius,
            stroke_width,
        }
    }

    /// Radius at the middle of the stroke band, bounding the bar's
    /// visible extent.
    #[must_use]
    pub fn inner_radius(&self) -> f64 {
        self.outer_radius - self.stroke_width / 2.0
    }

    /// Endpoints of the 45-degree diagonal bar.
    #[must_use]
    pub fn bar_endpoints(&self) -> ((f64, f64), (f64, f64)) {
        let half = self.inner_radius();
        let offset = half * std::f64::consts::FRAC_1_SQRT_2;
        (
            (self.center_x - offset, self.center_y - offset),
            (self.center_x + offset, self.center_y + offset),
        )
    }

    /// Lowest point of the ring; the caption band starts here.
    #[must_use]
    pub fn ring_bottom(&self) -> f64 {
        self.center_y + self.outer_radius
    }
}

/// Paint the ring and diagonal bar onto `canvas`.
///
/// Coverage is decided per pixel center: the ring band is the annulus
/// `outer - stroke ..= outer`, the bar is a capsule of half-width
/// `stroke / 2` around the diagonal segment.
pub fn draw_prohibition_glyph(canvas: &mut RgbImage, geometry: &GlyphGeometry, color: Rgb<u8>) {
    let (start, end) = geometry.bar_endpoints();
    let reach = geometry.outer_radius + 1.0;
    let (x0, x1) = pixel_span(geometry.center_x, reach, canvas.width());
    let (y0, y1) = pixel_span(geometry.center_y, reach, canvas.height());
    let band_inner = geometry.outer_radius - geometry.stroke_width;
    let half_bar = geometry.stroke_width / 2.0;

    for y in y0..y1 {
        for x in x0..x1 {
            let px = f64::from(x) + 0.5;
            let py = f64::from(y) + 0.5;
            let dist = (px - geometry.center_x).hypot(py - geometry.center_y);
            let on_ring = dist <= geometry.outer_radius && dist >= band_inner;
            let on_bar = distance_to_segment((px, py), start, end) <= half_bar;
            if on_ring || on_bar {
                canvas.put_pixel(x, y, color);
            }
        }
    }
}

/// Clamp `center ± reach` to valid pixel coordinates in `0..limit`.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn pixel_span(center: f64, reach: f64, limit: u32) -> (u32, u32) {
    let low = (center - reach).floor().max(0.0) as u32;
    let high = (center + reach).ceil().max(0.0) as u32;
    (low.min(limit), high.min(limit))
}

/// Euclidean distance from a point to a line segment.
fn distance_to_segment(p: (f64, f64), a: (f64, f64), b: (f64, f64)) -> f64 {
    let (dx, dy) = (b.0 - a.0, b.1 - a.1);
    let length_sq = dx.mul_add(dx, dy * dy);
    if length_sq <= f64::EPSILON {
        return (p.0 - a.0).hypot(p.1 - a.1);
    }
    let t = ((p.0 - a.0).mul_add(dx, (p.1 - a.1) * dy) / length_sq).clamp(0.0, 1.0);
    let cx = t.mul_add(dx, a.0);
    let cy = t.mul_add(dy, a.1);
    (p.0 - cx).hypot(p.1 - cy)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ALERT, BACKGROUND};

    #[test]
    fn geometry_matches_reference_scenario() {
        // 600 canvas, 320x480 subject placed at (140, 12).
        let geometry = GlyphGeometry::new(600, 320, 480, 140, 12, &ComposeConfig::default());
        assert!((geometry.center_x - 300.0).abs() < f64::EPSILON);
        assert!((geometry.center_y - 252.0).abs() < f64::EPSILON);
        // diameter = 320 + 12 -> radius 166; stroke = 36.
        assert!((geometry.outer_radius - 166.0).abs() < f64::EPSILON);
        assert!((geometry.stroke_width - 36.0).abs() < f64::EPSILON);
        assert!((geometry.inner_radius() - 148.0).abs() < f64::EPSILON);
        assert!((geometry.ring_bottom() - 418.0).abs() < f64::EPSILON);
    }

    #[test]
    fn ring_encloses_subject_for_any_aspect_ratio() {
        let config = ComposeConfig::default();
        for (w, h) in [(320, 480), (480, 320), (100, 100), (13, 700), (700, 13)] {
            let side = w.max(h);
            let geometry = GlyphGeometry::new(side, w, h, 0, 0, &config);
            let subject_radius = f64::from(w.min(h)) / 2.0;
            assert!(
                geometry.outer_radius >= subject_radius,
                "ring radius {} must enclose subject radius {subject_radius} for {w}x{h}",
                geometry.outer_radius,
            );
        }
    }

    #[test]
    fn bar_endpoints_stay_inside_outer_edge() {
        let config = ComposeConfig::default();
        for side in [10_u32, 50, 137, 600, 4096] {
            let geometry = GlyphGeometry::new(side, side, side, 0, 0, &config);
            let (start, end) = geometry.bar_endpoints();
            for point in [start, end] {
                let dist = (point.0 - geometry.center_x).hypot(point.1 - geometry.center_y);
                assert!(
                    dist < geometry.outer_radius,
                    "bar endpoint at distance {dist} overshoots radius {} (side {side})",
                    geometry.outer_radius,
                );
            }
        }
    }

    #[test]
    fn stroke_width_is_floored() {
        let geometry = GlyphGeometry::new(16, 16, 16, 0, 0, &ComposeConfig::default());
        // 6% of 16 truncates to 0; the floor lifts it to 2.
        assert!((geometry.stroke_width - 2.0).abs() < f64::EPSILON);
    }

    #[test]
    fn geometry_holds_under_varied_ratios() {
        let config = ComposeConfig {
            ring_padding_ratio: 0.1,
            stroke_ratio: 0.2,
            ..ComposeConfig::default()
        };
        let geometry = GlyphGeometry::new(200, 100, 100, 50, 50, &config);
        // diameter = 100 + 20 -> radius 60; stroke = 40.
        assert!((geometry.outer_radius - 60.0).abs() < f64::EPSILON);
        assert!((geometry.stroke_width - 40.0).abs() < f64::EPSILON);
        assert!((geometry.inner_radius() - 40.0).abs() < f64::EPSILON);
    }

    #[test]
    fn draw_paints_ring_band_and_bar_only() {
        let mut canvas = RgbImage::from_pixel(100, 100, BACKGROUND);
        let geometry = GlyphGeometry {
            center_x: 50.0,
            center_y: 50.0,
            outer_radius: 40.0,
            stroke_width: 6.0,
        };
        draw_prohibition_glyph(&mut canvas, &geometry, ALERT);

        // On the ring band (distance ~38.5 from center along +x).
        assert_eq!(*canvas.get_pixel(88, 50), ALERT);
        // Center of the canvas lies on the bar.
        assert_eq!(*canvas.get_pixel(50, 50), ALERT);
        // Inside the ring but off the bar: (50 + 20, 50 - 20) is 28.3
        // from center, clear of the band and 28.3 from the diagonal.
        assert_eq!(*canvas.get_pixel(70, 30), BACKGROUND);
        // Outside the ring entirely.
        assert_eq!(*canvas.get_pixel(0, 0), BACKGROUND);
    }

    #[test]
    fn distance_to_segment_handles_degenerate_segment() {
        let d = distance_to_segment((3.0, 4.0), (0.0, 0.0), (0.0, 0.0));
        assert!((d - 5.0).abs() < 1e-12);
    }

    #[test]
    fn distance_to_segment_clamps_to_endpoints() {
        // Point beyond the segment end projects onto the endpoint.
        let d = distance_to_segment((15.0, 0.0), (0.0, 0.0), (10.0, 0.0));
        assert!((d - 5.0).abs() < 1e-12);
    }
}
