//! Validates the input path and decodes the image behind it.
//!
//! Decoding happens in two passes over the same file handle: the header pass
//! sniffs the format from the magic bytes and reads the dimensions, then the
//! stream is rewound and the full pixel content is decoded.

use crate::error::AppError;
use image::error::{ImageFormatHint, UnsupportedError, UnsupportedErrorKind};
use image::{DynamicImage, ImageError, ImageFormat, ImageReader};
use std::fs::{self, File};
use std::io::{BufReader, ErrorKind, Seek};
use std::path::Path;

/// The closed set of formats that can be read and written back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StripFormat {
    Jpeg,
    Png,
    Gif,
}

impl StripFormat {
    /// The lowercase format name reported on stdout.
    pub fn name(self) -> &'static str {
        match self {
            StripFormat::Jpeg => "jpeg",
            StripFormat::Png => "png",
            StripFormat::Gif => "gif",
        }
    }

    pub fn image_format(self) -> ImageFormat {
        match self {
            StripFormat::Jpeg => ImageFormat::Jpeg,
            StripFormat::Png => ImageFormat::Png,
            StripFormat::Gif => ImageFormat::Gif,
        }
    }
}

impl TryFrom<ImageFormat> for StripFormat {
    type Error = AppError;

    fn try_from(format: ImageFormat) -> Result<Self, Self::Error> {
        match format {
            ImageFormat::Jpeg => Ok(StripFormat::Jpeg),
            ImageFormat::Png => Ok(StripFormat::Png),
            ImageFormat::Gif => Ok(StripFormat::Gif),
            other => Err(AppError::UnsupportedFormat(
                format!("{:?}", other).to_lowercase(),
            )),
        }
    }
}

/// A fully decoded source image together with its header information.
pub struct LoadedImage {
    pub width: u32,
    pub height: u32,
    pub format: StripFormat,
    pub image: DynamicImage,
}

/// Checks that `path` exists, telling a missing path apart from other stat failures.
pub fn ensure_exists(path: &Path) -> Result<(), AppError> {
    match fs::metadata(path) {
        Ok(_) => Ok(()),
        Err(e) if e.kind() == ErrorKind::NotFound => Err(AppError::NotFound(path.to_path_buf())),
        Err(e) => Err(AppError::UnknownStat {
            path: path.to_path_buf(),
            source: e,
        }),
    }
}

/// Opens and decodes the image at `path`.
///
/// Prints the `Width: .. Height: .. Format: ..` line once the header has been
/// read, before the full decode starts.
pub fn load_image(path: &Path) -> Result<LoadedImage, AppError> {
    let file = File::open(path).map_err(|source| AppError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    let mut reader = BufReader::new(file);

    let (format, (width, height)) = read_header(&mut reader)?;
    println!(
        "Width: {} Height: {} Format: {}",
        width,
        height,
        format.name()
    );

    reader.rewind().map_err(AppError::Seek)?;
    log::debug!("rewound {} for full decode", path.display());

    let image = ImageReader::with_format(&mut reader, format.image_format())
        .decode()
        .map_err(AppError::Decode)?;

    Ok(LoadedImage {
        width,
        height,
        format,
        image,
    })
}

/// Sniffs the format and reads the dimensions without decoding any pixels.
fn read_header(reader: &mut BufReader<File>) -> Result<(StripFormat, (u32, u32)), AppError> {
    let header = ImageReader::new(reader)
        .with_guessed_format()
        .map_err(|e| AppError::DecodeConfig(ImageError::IoError(e)))?;

    let detected = header.format().ok_or_else(|| {
        AppError::DecodeConfig(ImageError::Unsupported(
            UnsupportedError::from_format_and_kind(
                ImageFormatHint::Unknown,
                UnsupportedErrorKind::Format(ImageFormatHint::Unknown),
            ),
        ))
    })?;
    let format = StripFormat::try_from(detected)?;
    log::debug!("detected {} from magic bytes", format.name());

    let dimensions = header.into_dimensions().map_err(AppError::DecodeConfig)?;
    Ok((format, dimensions))
}
