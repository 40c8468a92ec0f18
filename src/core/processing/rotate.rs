use image::{RgbImage, imageops};
use imageproc::geometric_transformations::{Interpolation, rotate_about_center};
use tracing::debug;

use crate::core::geometry::{quarter_turns, rotated_dimensions};
use crate::core::processing::padding::PAD_COLOR;

/// Rotates clockwise by `degrees`.
///
/// Right angles are exact transposes. Any other angle is resampled bilinearly
/// onto the rotated bounding box, with uncovered corners filled black.
pub fn rotate_rgb(image: RgbImage, degrees: f64) -> RgbImage {
    match quarter_turns(degrees) {
        Some(0) => image,
        Some(1) => imageops::rotate90(&image),
        Some(2) => imageops::rotate180(&image),
        Some(3) => imageops::rotate270(&image),
        _ => rotate_arbitrary(&image, degrees),
    }
}

fn rotate_arbitrary(image: &RgbImage, degrees: f64) -> RgbImage {
    let (cols, rows) = image.dimensions();
    let (out_cols, out_rows) = rotated_dimensions(cols, rows, degrees);

    // Square canvas large enough for the source and its rotated bounds
    let diagonal = (cols as f64).hypot(rows as f64).ceil() as u32;
    let side = diagonal.max(out_cols).max(out_rows);
    let mut canvas = RgbImage::from_pixel(side, side, PAD_COLOR);
    imageops::overlay(
        &mut canvas,
        image,
        ((side - cols) / 2) as i64,
        ((side - rows) / 2) as i64,
    );

    debug!(
        "Rotating {}x{} by {} degrees -> {}x{}",
        cols, rows, degrees, out_cols, out_rows
    );
    let rotated = rotate_about_center(
        &canvas,
        degrees.to_radians() as f32,
        Interpolation::Bilinear,
        PAD_COLOR,
    );

    imageops::crop_imm(
        &rotated,
        (side - out_cols) / 2,
        (side - out_rows) / 2,
        out_cols,
        out_rows,
    )
    .to_image()
}
