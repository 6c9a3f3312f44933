//! Batch generator for banned-photo icons and rotating-avatar GIFs.
//!
//! Walks a directory of photos and writes one artifact per photo:
//! `ban` produces an opaque JPEG icon with a red prohibition glyph and
//! caption; `spin` produces an infinitely looping GIF of the circular
//! cutout rotating with transparent surroundings. Individual file
//! failures are logged and skipped; the run only aborts if the input
//! directory itself is unusable.

use std::fs;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use ab_glyph::FontVec;
use clap::{Parser, Subcommand};
use log::{error, info, warn};
use rondo_pipeline::ComposeConfig;
use rondo_rotate::{FfmpegRotator, RotateParams, encode_animation, rotate_with_transparency};

#[derive(Parser)]
#[command(version, about)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate banned-photo icons (JPEG, opaque, glyph + caption).
    Ban {
        /// Directory of source photos.
        input: PathBuf,

        /// Directory artifacts are written to (created if missing).
        output: PathBuf,

        /// TrueType/OpenType font file for the caption.
        ///
        /// Without a font the caption is skipped; the glyph is still
        /// drawn.
        #[arg(long)]
        font: Option<PathBuf>,

        /// Caption text drawn below the glyph.
        #[arg(long, default_value = "BANNED")]
        caption: String,
    },
    /// Generate rotating circular-avatar GIFs (transparent, looping).
    Spin {
        /// Directory of source photos.
        input: PathBuf,

        /// Directory artifacts are written to (created if missing).
        output: PathBuf,

        /// Frames per second of the animation.
        #[arg(long, default_value_t = 25)]
        fps: u32,

        /// Seconds for one full revolution.
        #[arg(long, default_value_t = 1.0)]
        duration: f64,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    match args.command {
        Command::Ban {
            input,
            output,
            font,
            caption,
        } => {
            let font = font.as_deref().and_then(load_font);
            run_batch(&input, &output, "jpg", |bytes, destination| {
                let icon =
                    rondo_pipeline::ban_icon(bytes, font.as_ref(), &caption, &ComposeConfig::default())?;
                icon.save_with_format(destination, image::ImageFormat::Jpeg)?;
                Ok(())
            })
        }
        Command::Spin {
            input,
            output,
            fps,
            duration,
        } => {
            let rotator = FfmpegRotator::default();
            if !rotator.is_available() {
                // Reported once up front; each file still surfaces its
                // own spawn failure and the batch moves on.
                warn!("ffmpeg not found on PATH; every `spin` file will fail");
            }
            let params = RotateParams {
                fps,
                duration_secs: duration,
            };
            run_batch(&input, &output, "gif", |bytes, destination| {
                let cutout = rondo_pipeline::circle_cutout(bytes)?;
                let sequence = rotate_with_transparency(&rotator, &cutout, &params)?;
                let file = fs::File::create(destination)?;
                encode_animation(BufWriter::new(file), &sequence)?;
                Ok(())
            })
        }
    }
}

/// Load a caption font, warning (not failing) when it is unusable.
fn load_font(path: &Path) -> Option<FontVec> {
    match fs::read(path).map(FontVec::try_from_vec) {
        Ok(Ok(font)) => Some(font),
        Ok(Err(parse_error)) => {
            warn!("unusable font {}: {parse_error}; captions skipped", path.display());
            None
        }
        Err(io_error) => {
            warn!("cannot read font {}: {io_error}; captions skipped", path.display());
            None
        }
    }
}

/// Process every image in `input`, writing one artifact per file.
///
/// `process` receives the raw file bytes and the destination path.
/// Per-file failures are logged and the batch continues; only an
/// unreadable input directory aborts the run.
fn run_batch(
    input: &Path,
    output: &Path,
    extension: &str,
    process: impl Fn(&[u8], &Path) -> Result<(), Box<dyn std::error::Error>>,
) -> Result<(), Box<dyn std::error::Error>> {
    let sources = enumerate_images(input)?;
    if sources.is_empty() {
        warn!("no images found in {}", input.display());
        return Ok(());
    }
    fs::create_dir_all(output)?;

    let mut written = 0_usize;
    let mut failed = 0_usize;
    for source in &sources {
        let destination = output.join(artifact_name(source, extension));
        match fs::read(source).map_err(Into::into).and_then(|bytes| {
            process(&bytes, &destination)
        }) {
            Ok(()) => {
                info!("{} -> {}", source.display(), destination.display());
                written += 1;
            }
            Err(file_error) => {
                error!("{}: {file_error}", source.display());
                failed += 1;
            }
        }
    }
    info!("{written} written, {failed} failed, {} total", sources.len());
    Ok(())
}

/// Images in `directory` with a recognized extension, in name order.
fn enumerate_images(directory: &Path) -> std::io::Result<Vec<PathBuf>> {
    let mut paths: Vec<PathBuf> = fs::read_dir(directory)?
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| has_image_extension(path))
        .collect();
    paths.sort();
    Ok(paths)
}

fn has_image_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|extension| extension.to_str())
        .is_some_and(|extension| {
            matches!(
                extension.to_ascii_lowercase().as_str(),
                "jpg" | "jpeg" | "png" | "bmp" | "webp"
            )
        })
}

/// Output filename: the source's base name with the artifact extension.
fn artifact_name(source: &Path, extension: &str) -> PathBuf {
    let stem = source.file_stem().unwrap_or_default();
    let mut name = stem.to_os_string();
    name.push(".");
    name.push(extension);
    PathBuf::from(name)
}
