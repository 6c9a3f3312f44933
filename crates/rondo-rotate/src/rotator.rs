//! Rotation port and shared parameter types.
//!
//! The pipeline only needs "turn this still into a sequence of rotated
//! frames"; [`Rotate`] is that seam. The production implementation
//! shells out to ffmpeg ([`crate::ffmpeg::FfmpegRotator`]); tests use
//! an in-process fake.

use rondo_pipeline::{AnimatedSequence, PipelineError, RgbaImage};
use serde::{Deserialize, Serialize};

/// Frame-rate and duration of one full revolution.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Serialize)]
pub struct RotateParams {
    /// Frames per second of the output animation.
    pub fps: u32,
    /// Seconds for one full 360-degree turn.
    pub duration_secs: f64,
}

impl Default for RotateParams {
    fn default() -> Self {
        Self {
            fps: 25,
            duration_secs: 1.0,
        }
    }
}

impl RotateParams {
    /// Expected number of frames in the output sequence.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn frame_count(&self) -> u32 {
        (f64::from(self.fps) * self.duration_secs).round() as u32
    }
}

/// Errors from the rotation pipeline.
#[derive(Debug, thiserror::Error)]
pub enum RotateError {
    /// The rotator executable could not be started.
    #[error("failed to spawn rotator process: {0}")]
    Spawn(std::io::Error),
    /// The rotator process ran but reported failure.
    #[error("rotator exited with {status}: {stderr}")]
    ExitStatus {
        /// Exit status reported by the process.
        status: std::process::ExitStatus,
        /// Captured standard error, trimmed.
        stderr: String,
    },
    /// The rotator produced no output file.
    #[error("rotator produced no output")]
    EmptyOutput,
    /// The decoded animation contained no frames.
    #[error("decoded animation contained no frames")]
    EmptySequence,
    /// A GIF stream could not be decoded.
    #[error("GIF decode failed: {0}")]
    GifDecode(#[from] gif::DecodingError),
    /// A GIF stream could not be encoded.
    #[error("GIF encode failed: {0}")]
    GifEncode(#[from] gif::EncodingError),
    /// Frame dimensions exceed the GIF format's 16-bit limit.
    #[error("frame {0}x{1} exceeds the GIF dimension limit of 65535")]
    FrameTooLarge(u32, u32),
    /// Filesystem interaction failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),
    /// The compositing pipeline rejected the frames.
    #[error(transparent)]
    Pipeline(#[from] PipelineError),
    /// Image encoding or decoding failed.
    #[error(transparent)]
    Image(#[from] image::ImageError),
}

/// Produces a rotating animation from a single still image.
pub trait Rotate {
    /// Rotate `image` through one full revolution.
    ///
    /// # Errors
    ///
    /// Returns [`RotateError`] if the rotation backend fails or its
    /// output cannot be decoded.
    fn rotate(
        &self,
        image: &RgbaImage,
        params: &RotateParams,
    ) -> Result<AnimatedSequence, RotateError>;
}
