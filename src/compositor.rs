//! This module builds the output canvas.
//!
//! The canvas is the source image padded with `NUM_STRIPS` solid bands above
//! and the same bands, in the same order, below. The band colours are a
//! rotation of a fixed palette; the rotation offset is drawn once per run.

use image::{imageops, DynamicImage, Rgba, RgbaImage};
use rand::Rng;

/// Height in pixels of a single strip.
pub const STRIP_HEIGHT: u32 = 3;
/// Number of strips in each of the top and bottom regions.
pub const NUM_STRIPS: u32 = 6;

/// Strip colours: red, green, blue, magenta, yellow, cyan.
pub const PALETTE: [Rgba<u8>; 6] = [
    Rgba([255, 0, 0, 255]),
    Rgba([0, 255, 0, 255]),
    Rgba([0, 0, 255, 255]),
    Rgba([255, 0, 255, 255]),
    Rgba([255, 255, 0, 255]),
    Rgba([0, 255, 255, 255]),
];

/// Exclusive upper bound of the rotation offset. One less than the palette
/// length, so a rotation starting at cyan never happens.
const OFFSET_RANGE: usize = 5;

/// Total height added to the source image.
pub fn padding() -> u32 {
    2 * STRIP_HEIGHT * NUM_STRIPS
}

/// Height of the canvas built for a source of height `source_height`.
pub fn padded_height(source_height: u32) -> u32 {
    source_height + padding()
}

/// Draws the palette rotation offset.
pub fn pick_offset<R: Rng + ?Sized>(rng: &mut R) -> usize {
    rng.random_range(0..OFFSET_RANGE)
}

/// Colour of strip `index` (counted from the top of either region).
pub fn strip_color(index: u32, offset: usize) -> Rgba<u8> {
    PALETTE[(index as usize + offset) % PALETTE.len()]
}

/// Builds the padded canvas for `source` using the given palette offset.
///
/// # Arguments
///
/// * `source` - The decoded image; it is never modified.
/// * `offset` - The palette rotation, normally from `pick_offset`.
///
/// # Returns
///
/// An RGBA canvas as wide as `source` and `padding()` pixels taller, with the
/// source drawn over it starting at row `STRIP_HEIGHT * NUM_STRIPS`.
pub fn add_strips(source: &DynamicImage, offset: usize) -> RgbaImage {
    let width = source.width();
    let source_height = source.height();
    let mut canvas = RgbaImage::new(width, padded_height(source_height));

    let region = STRIP_HEIGHT * NUM_STRIPS;
    let bottom_start = source_height + region;
    for i in 0..NUM_STRIPS {
        let color = strip_color(i, offset);
        fill_rows(&mut canvas, i * STRIP_HEIGHT, STRIP_HEIGHT, color);
        fill_rows(&mut canvas, bottom_start + i * STRIP_HEIGHT, STRIP_HEIGHT, color);
    }

    // Alpha-over: translucent source pixels blend with the transparent canvas.
    imageops::overlay(&mut canvas, &source.to_rgba8(), 0, i64::from(region));
    canvas
}

/// Overwrites `rows` full-width rows starting at `top` with `color`.
fn fill_rows(canvas: &mut RgbaImage, top: u32, rows: u32, color: Rgba<u8>) {
    let width = canvas.width();
    for y in top..top + rows {
        for x in 0..width {
            canvas.put_pixel(x, y, color);
        }
    }
}
