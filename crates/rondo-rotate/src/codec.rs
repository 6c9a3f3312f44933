//! GIF decode and encode for animated sequences.
//!
//! Decoding composites GIF sub-frames onto a full-size screen so every
//! [`SequenceFrame`] covers the whole canvas, honoring per-frame
//! offsets and disposal. Encoding writes an infinitely looping GIF and
//! passes each frame's delay and disposal through unchanged.

use std::io::{Read, Write};

use gif::{ColorOutput, DecodeOptions, DisposalMethod, Encoder, Frame, Repeat};
use image::Rgba;
use rondo_pipeline::{AnimatedSequence, FrameDisposal, RgbaImage, SequenceFrame};

use crate::rotator::RotateError;

fn disposal_from_gif(method: DisposalMethod) -> FrameDisposal {
    match method {
        DisposalMethod::Any => FrameDisposal::Any,
        DisposalMethod::Keep => FrameDisposal::Keep,
        DisposalMethod::Background => FrameDisposal::Background,
        DisposalMethod::Previous => FrameDisposal::Previous,
    }
}

fn disposal_to_gif(disposal: FrameDisposal) -> DisposalMethod {
    match disposal {
        FrameDisposal::Any => DisposalMethod::Any,
        FrameDisposal::Keep => DisposalMethod::Keep,
        FrameDisposal::Background => DisposalMethod::Background,
        FrameDisposal::Previous => DisposalMethod::Previous,
    }
}

/// Decode a GIF stream into full-canvas RGBA frames.
///
/// # Errors
///
/// Returns [`RotateError::GifDecode`] on malformed input and
/// [`RotateError::EmptySequence`] if the stream holds no frames.
pub fn decode_animation(reader: impl Read) -> Result<AnimatedSequence, RotateError> {
    let mut options = DecodeOptions::new();
    options.set_color_output(ColorOutput::RGBA);
    let mut decoder = options.read_info(reader)?;

    let width = u32::from(decoder.width());
    let height = u32::from(decoder.height());
    let mut screen = RgbaImage::from_pixel(width, height, Rgba([0, 0, 0, 0]));
    let mut frames = Vec::new();

    while let Some(frame) = decoder.read_next_frame()? {
        let restore = match frame.dispose {
            DisposalMethod::Previous => Some(screen.clone()),
            _ => None,
        };
        blit_subframe(&mut screen, frame);
        frames.push(SequenceFrame {
            image: screen.clone(),
            delay_cs: frame.delay,
            disposal: disposal_from_gif(frame.dispose),
        });
        match frame.dispose {
            DisposalMethod::Background => {
                clear_region(&mut screen, frame);
            }
            DisposalMethod::Previous => {
                if let Some(previous) = restore {
                    screen = previous;
                }
            }
            DisposalMethod::Any | DisposalMethod::Keep => {}
        }
    }

    if frames.is_empty() {
        return Err(RotateError::EmptySequence);
    }
    Ok(AnimatedSequence::new(frames)?)
}

/// Composite one sub-frame onto the screen, skipping transparent pixels.
fn blit_subframe(screen: &mut RgbaImage, frame: &Frame<'_>) {
    let left = u32::from(frame.left);
    let top = u32::from(frame.top);
    for y in 0..u32::from(frame.height) {
        for x in 0..u32::from(frame.width) {
            let offset = ((y * u32::from(frame.width) + x) * 4) as usize;
            let pixel = &frame.buffer[offset..offset + 4];
            if pixel[3] == 0 {
                continue;
            }
            if let Some(target) = screen.get_pixel_mut_checked(left + x, top + y) {
                *target = Rgba([pixel[0], pixel[1], pixel[2], pixel[3]]);
            }
        }
    }
}

/// Reset a sub-frame's region to transparent.
fn clear_region(screen: &mut RgbaImage, frame: &Frame<'_>) {
    let left = u32::from(frame.left);
    let top = u32::from(frame.top);
    for y in 0..u32::from(frame.height) {
        for x in 0..u32::from(frame.width) {
            if let Some(target) = screen.get_pixel_mut_checked(left + x, top + y) {
                *target = Rgba([0, 0, 0, 0]);
            }
        }
    }
}

/// Encode a sequence as an infinitely looping GIF.
///
/// # Errors
///
/// Returns [`RotateError::EmptySequence`] for an empty sequence,
/// [`RotateError::FrameTooLarge`] if the canvas exceeds the format's
/// 16-bit dimensions, and [`RotateError::GifEncode`] on writer failure.
pub fn encode_animation(
    writer: impl Write,
    sequence: &AnimatedSequence,
) -> Result<(), RotateError> {
    let Some((width, height)) = sequence.dimensions() else {
        return Err(RotateError::EmptySequence);
    };
    let (Ok(gif_width), Ok(gif_height)) = (u16::try_from(width), u16::try_from(height)) else {
        return Err(RotateError::FrameTooLarge(width, height));
    };

    let mut encoder = Encoder::new(writer, gif_width, gif_height, &[])?;
    encoder.set_repeat(Repeat::Infinite)?;
    for frame in sequence.frames() {
        let mut pixels = frame.image.as_raw().clone();
        let mut encoded = Frame::from_rgba_speed(gif_width, gif_height, &mut pixels, 10);
        encoded.delay = frame.delay_cs;
        encoded.dispose = disposal_to_gif(frame.disposal);
        encoder.write_frame(&encoded)?;
    }
    Ok(())
}
