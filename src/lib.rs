//! The main library for the `calstrip` application.
//!
//! This crate pads an image with coloured calibration strips. It reads a JPEG,
//! PNG or GIF file, adds `NUM_STRIPS` bands of `STRIP_HEIGHT` pixels above and
//! below the original content, and writes the result next to the input in the
//! same format, with the new height embedded in the filename.
//!
//! The library is structured into several modules:
//! - `cli`: Defines the command-line interface.
//! - `image_loader`: Checks the input path and decodes the image.
//! - `compositor`: Builds the padded canvas and paints the strips.
//! - `encoder`: Re-encodes the canvas in the input's format.
//! - `error`: Defines the application's custom error type.

use anyhow::{Context, Result};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};

pub mod cli;
pub mod compositor;
pub mod encoder;
pub mod error;
pub mod image_loader;

use crate::cli::Cli;
use crate::error::AppError;

/// The main entry point for the application logic.
///
/// Seeds the strip colour generator from `--seed` when given, from the OS
/// otherwise, and hands over to `run_with_rng`.
///
/// # Errors
///
/// Returns `AppError::MissingArgument` when no image was given, and any error
/// raised while loading, compositing or saving.
pub fn run(cli: &Cli) -> Result<PathBuf> {
    let input_path = cli.input_path.as_deref().ok_or(AppError::MissingArgument)?;

    let mut rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    let output = run_with_rng(input_path, &mut rng)?;
    log::info!("saved to '{}'", output.display());
    Ok(output)
}

/// Pads a single image, drawing the palette offset from `rng`.
///
/// # Arguments
///
/// * `input_path` - The image to pad.
/// * `rng` - Source of the strip colour offset.
///
/// # Returns
///
/// The path of the written image.
pub fn run_with_rng<R: Rng + ?Sized>(input_path: &Path, rng: &mut R) -> Result<PathBuf> {
    // 1. Validate and decode
    image_loader::ensure_exists(input_path)?;
    let loaded = image_loader::load_image(input_path)?;

    // 2. Composite
    let offset = compositor::pick_offset(rng);
    log::debug!("palette offset {}", offset);
    let canvas = compositor::add_strips(&loaded.image, offset);
    let new_height = canvas.height();

    // 3. Save next to the input
    let output = output_path(input_path, new_height);
    encoder::save_image(&canvas, loaded.format, &output)
        .with_context(|| format!("Failed to write output to {}", output.display()))?;
    log::debug!("wrote {}", output.display());

    Ok(output)
}

/// Determines where the padded image is written.
///
/// The new name is `<stem>_<new_height><ext>` in the input's directory, where
/// `<ext>` is everything from the last `.` of the filename on (empty when the
/// name has no dot).
pub fn output_path(input_path: &Path, new_height: u32) -> PathBuf {
    let name = input_path.file_name().unwrap_or_default().as_encoded_bytes();
    let dot = name.iter().rposition(|&b| b == b'.').unwrap_or(name.len());
    // SAFETY: both halves come from `as_encoded_bytes` and are split right
    // before an ASCII '.' or at the end of the string.
    let (stem, ext) = unsafe {
        (
            OsStr::from_encoded_bytes_unchecked(&name[..dot]),
            OsStr::from_encoded_bytes_unchecked(&name[dot..]),
        )
    };

    let mut new_name = stem.to_os_string();
    new_name.push(format!("_{}", new_height));
    new_name.push(ext);
    input_path.with_file_name(new_name)
}
