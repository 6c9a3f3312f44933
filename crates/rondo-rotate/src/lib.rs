//! rondo-rotate: rotation pipeline for rondo.
//!
//! Builds the rotating-avatar animation: a circular cutout from
//! `rondo-pipeline` goes through an external rotation backend (ffmpeg,
//! behind the [`Rotate`] trait) and comes back as GIF frames whose
//! circular transparency is then reconstructed.

pub mod codec;
pub mod ffmpeg;
pub mod rotator;
pub mod spin;

pub use codec::{decode_animation, encode_animation};
pub use ffmpeg::FfmpegRotator;
pub use rotator::{Rotate, RotateError, RotateParams};
pub use spin::rotate_with_transparency;
