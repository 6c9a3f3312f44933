//! Compose rotation with transparency reconstruction.

use rondo_pipeline::{AnimatedSequence, RgbaImage, remask_frames};

use crate::rotator::{Rotate, RotateError, RotateParams};

/// Rotate a circular cutout and restore its transparency.
///
/// The rotation backend is free to paint an opaque filler outside the
/// subject; every returned frame is remasked so pixels outside the
/// inscribed circle carry zero alpha.
///
/// # Errors
///
/// Returns [`RotateError`] if the backend fails or produces no frames.
pub fn rotate_with_transparency(
    rotator: &impl Rotate,
    image: &RgbaImage,
    params: &RotateParams,
) -> Result<AnimatedSequence, RotateError> {
    let rotated = rotator.rotate(image, params)?;
    if rotated.is_empty() {
        return Err(RotateError::EmptySequence);
    }
    Ok(remask_frames(&rotated))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use image::Rgba;
    use rondo_pipeline::{FrameDisposal, SequenceFrame};

    use super::*;

    /// In-process stand-in that emits the requested number of frames,
    /// each filled with an opaque color, imitating a backend that
    /// replaces the transparent fill with a filler color.
    struct FakeRotator {
        fill: Rgba<u8>,
    }

    impl Rotate for FakeRotator {
        fn rotate(
            &self,
            image: &RgbaImage,
            params: &RotateParams,
        ) -> Result<AnimatedSequence, RotateError> {
            let (width, height) = image.dimensions();
            let frames = (0..params.frame_count())
                .map(|index| SequenceFrame {
                    image: RgbaImage::from_pixel(width, height, self.fill),
                    delay_cs: 4,
                    disposal: if index % 2 == 0 {
                        FrameDisposal::Background
                    } else {
                        FrameDisposal::Keep
                    },
                })
                .collect();
            Ok(AnimatedSequence::new(frames)?)
        }
    }

    struct EmptyRotator;

    impl Rotate for EmptyRotator {
        fn rotate(
            &self,
            _image: &RgbaImage,
            _params: &RotateParams,
        ) -> Result<AnimatedSequence, RotateError> {
            Ok(AnimatedSequence::new(Vec::new())?)
        }
    }

    #[test]
    fn emits_one_frame_per_tick_of_the_revolution() {
        let rotator = FakeRotator {
            fill: Rgba([255, 255, 255, 255]),
        };
        let image = RgbaImage::from_pixel(40, 40, Rgba([9, 9, 9, 255]));
        let sequence =
            rotate_with_transparency(&rotator, &image, &RotateParams::default()).unwrap();
        assert_eq!(sequence.len(), 25);
    }

    #[test]
    fn filler_outside_the_circle_becomes_transparent() {
        let rotator = FakeRotator {
            fill: Rgba([255, 255, 255, 255]),
        };
        let image = RgbaImage::from_pixel(40, 40, Rgba([9, 9, 9, 255]));
        let sequence =
            rotate_with_transparency(&rotator, &image, &RotateParams::default()).unwrap();
        for frame in sequence.frames() {
            assert_eq!(frame.image.get_pixel(0, 0).0[3], 0);
            assert_eq!(frame.image.get_pixel(39, 39).0[3], 0);
            assert_eq!(frame.image.get_pixel(20, 20).0, [255, 255, 255, 255]);
        }
    }

    #[test]
    fn timing_and_disposal_survive_remasking() {
        let rotator = FakeRotator {
            fill: Rgba([0, 128, 0, 255]),
        };
        let image = RgbaImage::from_pixel(16, 16, Rgba([1, 2, 3, 255]));
        let params = RotateParams {
            fps: 4,
            duration_secs: 1.0,
        };
        let sequence = rotate_with_transparency(&rotator, &image, &params).unwrap();
        assert_eq!(sequence.len(), 4);
        let disposals: Vec<_> = sequence.frames().iter().map(|f| f.disposal).collect();
        assert_eq!(
            disposals,
            vec![
                FrameDisposal::Background,
                FrameDisposal::Keep,
                FrameDisposal::Background,
                FrameDisposal::Keep,
            ],
        );
        assert!(sequence.frames().iter().all(|f| f.delay_cs == 4));
    }

    #[test]
    fn empty_backend_output_is_an_error() {
        let image = RgbaImage::from_pixel(8, 8, Rgba([0, 0, 0, 255]));
        let result = rotate_with_transparency(&EmptyRotator, &image, &RotateParams::default());
        assert!(matches!(result, Err(RotateError::EmptySequence)));
    }
}
