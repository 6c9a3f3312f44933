//! Animated frame sequences and circular remasking.
//!
//! The external rotation tool is asked for a transparent fill, but in
//! practice it substitutes an opaque filler color outside the rotating
//! subject. [`remask_frames`] restores the intended transparency by
//! compositing every frame through one shared circular mask: interior
//! pixels pass through unmodified, everything outside the circle is
//! forced to zero alpha regardless of what the tool painted there.

use image::Rgba;

use crate::circle::inscribed_circle_mask;
use crate::types::{PipelineError, RgbaImage};

/// Per-frame instruction for how a viewer treats the previous frame
/// before drawing the next one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameDisposal {
    /// Decoder's choice; treated like `Keep` by most viewers.
    Any,
    /// Leave the previous frame in place.
    Keep,
    /// Clear the frame's region to the background before the next frame.
    Background,
    /// Restore whatever preceded the previous frame.
    Previous,
}

/// One frame of an animated loop: pixels plus its declared timing and
/// disposal, carried through the pipeline unchanged.
#[derive(Debug, Clone, PartialEq)]
pub struct SequenceFrame {
    /// Full-canvas frame pixels.
    pub image: RgbaImage,
    /// Frame duration in centiseconds, as declared by the source.
    pub delay_cs: u16,
    /// Disposal policy, as declared by the source.
    pub disposal: FrameDisposal,
}

/// An ordered, looping frame sequence in which every frame shares the
/// same dimensions.
#[derive(Debug, Clone, PartialEq)]
pub struct AnimatedSequence {
    frames: Vec<SequenceFrame>,
}

impl AnimatedSequence {
    /// Build a sequence, enforcing that all frames share dimensions.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::FrameDimensionMismatch`] if any frame
    /// differs in size from the first.
    pub fn new(frames: Vec<SequenceFrame>) -> Result<Self, PipelineError> {
        if let Some(first) = frames.first() {
            let (w, h) = first.image.dimensions();
            for frame in &frames {
                let (fw, fh) = frame.image.dimensions();
                if (fw, fh) != (w, h) {
                    return Err(PipelineError::FrameDimensionMismatch(w, h, fw, fh));
                }
            }
        }
        Ok(Self { frames })
    }

    /// Shared frame dimensions, or `None` for an empty sequence.
    #[must_use]
    pub fn dimensions(&self) -> Option<(u32, u32)> {
        self.frames.first().map(|f| f.image.dimensions())
    }

    /// Number of frames in the loop.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.frames.len()
    }

    /// Returns `true` if the sequence has no frames.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// All frames in loop order.
    #[must_use]
    pub fn frames(&self) -> &[SequenceFrame] {
        &self.frames
    }

    /// Consume the sequence and return its frames.
    #[must_use]
    pub fn into_frames(self) -> Vec<SequenceFrame> {
        self.frames
    }
}

/// Rebuild every frame with guaranteed circular transparency.
///
/// One mask is built for the shared frame dimensions (the subject does
/// not change size while rotating in place) and applied to each frame:
/// the decoded pixels are composited onto a blank transparent frame
/// through the mask. Delays and disposal policies pass through
/// untouched.
#[must_use = "returns the remasked sequence"]
#[allow(clippy::cast_possible_truncation)]
pub fn remask_frames(sequence: &AnimatedSequence) -> AnimatedSequence {
    let Some((width, height)) = sequence.dimensions() else {
        return AnimatedSequence { frames: Vec::new() };
    };
    let mask = inscribed_circle_mask(width, height);

    let frames = sequence
        .frames()
        .iter()
        .map(|frame| {
            let image = RgbaImage::from_fn(width, height, |x, y| {
                let coverage = mask.get_pixel(x, y).0[0];
                if coverage == 0 {
                    Rgba([0, 0, 0, 0])
                } else {
                    let Rgba([r, g, b, a]) = *frame.image.get_pixel(x, y);
                    let alpha = (u16::from(a) * u16::from(coverage) + 127) / 255;
                    Rgba([r, g, b, alpha.min(255) as u8])
                }
            });
            SequenceFrame {
                image,
                delay_cs: frame.delay_cs,
                disposal: frame.disposal,
            }
        })
        .collect();

    AnimatedSequence { frames }
}
