use crate::error::AppError;
use crate::image_loader::StripFormat;
use image::codecs::gif::GifEncoder;
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::{DynamicImage, ExtendedColorType, Frame, ImageEncoder, RgbaImage};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

pub const JPEG_QUALITY: u8 = 90;

/// Writes `canvas` to `path` in `format`, truncating any existing file.
pub fn save_image(canvas: &RgbaImage, format: StripFormat, path: &Path) -> Result<(), AppError> {
    let file = File::create(path).map_err(|source| AppError::Create {
        path: path.to_path_buf(),
        source,
    })?;
    let mut writer = BufWriter::new(file);

    encode(canvas, format, &mut writer)?;
    writer
        .flush()
        .map_err(|e| AppError::Encode(image::ImageError::IoError(e)))?;
    Ok(())
}

/// Encodes `canvas` into `writer`.
pub fn encode<W: Write>(canvas: &RgbaImage, format: StripFormat, writer: W) -> Result<(), AppError> {
    let (width, height) = canvas.dimensions();
    log::debug!("encoding {}x{} canvas as {}", width, height, format.name());

    match format {
        StripFormat::Jpeg => {
            // JPEG carries no alpha channel.
            let rgb = DynamicImage::ImageRgba8(canvas.clone()).to_rgb8();
            JpegEncoder::new_with_quality(writer, JPEG_QUALITY).write_image(
                rgb.as_raw(),
                width,
                height,
                ExtendedColorType::Rgb8,
            )
        }
        StripFormat::Png => PngEncoder::new(writer).write_image(
            canvas.as_raw(),
            width,
            height,
            ExtendedColorType::Rgba8,
        ),
        StripFormat::Gif => GifEncoder::new(writer).encode_frame(Frame::new(canvas.clone())),
    }
    .map_err(AppError::Encode)
}
