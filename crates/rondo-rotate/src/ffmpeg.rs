//! ffmpeg-backed rotation.
//!
//! ffmpeg's `rotate` video filter is the one rotation backend that
//! handles the full revolution in a single pass: the still is looped as
//! a video source, rotated by `t * 2 * PI / duration`, and written out
//! as a GIF which is then decoded back into frames. The filter is asked
//! for a transparent fill color, but GIF output quantizes that away;
//! callers are expected to remask the result (see [`crate::spin`]).

use std::path::Path;
use std::process::Command;

use log::debug;
use rondo_pipeline::{AnimatedSequence, RgbaImage};

use crate::codec::decode_animation;
use crate::rotator::{Rotate, RotateError, RotateParams};

/// Rotation backend that shells out to the `ffmpeg` binary.
#[derive(Clone, Debug)]
pub struct FfmpegRotator {
    executable: String,
}

impl Default for FfmpegRotator {
    fn default() -> Self {
        Self {
            executable: "ffmpeg".to_owned(),
        }
    }
}

impl FfmpegRotator {
    /// Use a specific ffmpeg executable instead of `ffmpeg` from `PATH`.
    #[must_use]
    pub fn with_executable(executable: impl Into<String>) -> Self {
        Self {
            executable: executable.into(),
        }
    }

    /// Check whether the executable can be spawned at all.
    #[must_use]
    pub fn is_available(&self) -> bool {
        Command::new(&self.executable)
            .arg("-version")
            .output()
            .is_ok_and(|output| output.status.success())
    }

    fn run(&self, input: &Path, output: &Path, params: &RotateParams) -> Result<(), RotateError> {
        let filter = format!(
            "rotate=t*2*PI/{duration}:fillcolor=none",
            duration = params.duration_secs,
        );
        let mut command = Command::new(&self.executable);
        command
            .arg("-loglevel")
            .arg("error")
            .arg("-loop")
            .arg("1")
            .arg("-i")
            .arg(input)
            .arg("-vf")
            .arg(&filter)
            .arg("-t")
            .arg(params.duration_secs.to_string())
            .arg("-r")
            .arg(params.fps.to_string())
            .arg("-y")
            .arg(output);
        debug!("running rotation: {command:?}");

        let result = command.output().map_err(RotateError::Spawn)?;
        if !result.status.success() {
            return Err(RotateError::ExitStatus {
                status: result.status,
                stderr: String::from_utf8_lossy(&result.stderr).trim().to_owned(),
            });
        }
        Ok(())
    }
}

impl Rotate for FfmpegRotator {
    fn rotate(
        &self,
        image: &RgbaImage,
        params: &RotateParams,
    ) -> Result<AnimatedSequence, RotateError> {
        let workdir = tempfile::tempdir()?;
        let input = workdir.path().join("input.png");
        let output = workdir.path().join("rotated.gif");
        image.save(&input)?;

        self.run(&input, &output, params)?;

        if !output.exists() {
            return Err(RotateError::EmptyOutput);
        }
        let file = std::fs::File::open(&output)?;
        decode_animation(std::io::BufReader::new(file))
    }
}
