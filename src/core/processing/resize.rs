use fast_image_resize::{FilterType, PixelType, ResizeAlg, ResizeOptions, Resizer, images::Image};
use image::RgbImage;
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::types::ResizeFilter;

fn resize_alg(filter: ResizeFilter) -> ResizeAlg {
    match filter {
        ResizeFilter::Nearest => ResizeAlg::Nearest,
        ResizeFilter::Bilinear => ResizeAlg::Convolution(FilterType::Bilinear),
        ResizeFilter::CatmullRom => ResizeAlg::Convolution(FilterType::CatmullRom),
        ResizeFilter::Lanczos3 => ResizeAlg::Convolution(FilterType::Lanczos3),
    }
}

/// Resizes an interleaved RGB8 buffer to exactly `target_cols` x `target_rows`,
/// taking ownership of the source pixels.
pub fn resize_rgb_data(
    data: Vec<u8>,
    original_cols: u32,
    original_rows: u32,
    target_cols: u32,
    target_rows: u32,
    filter: ResizeFilter,
) -> Result<Vec<u8>> {
    let resize_options = ResizeOptions::new().resize_alg(resize_alg(filter));
    let mut resizer = Resizer::new();

    let src_image = Image::from_vec_u8(original_cols, original_rows, data, PixelType::U8x3)
        .map_err(Error::resize)?;
    let mut dst_image = Image::new(target_cols, target_rows, PixelType::U8x3);
    resizer
        .resize(&src_image, &mut dst_image, &resize_options)
        .map_err(Error::resize)?;

    Ok(dst_image.into_vec())
}

/// Scales `image` to `width` x `height`; returns it untouched when already that size.
pub fn resize_rgb(image: RgbImage, width: u32, height: u32, filter: ResizeFilter) -> Result<RgbImage> {
    let (cols, rows) = image.dimensions();
    if (cols, rows) == (width, height) {
        debug!("Already {}x{}, skipping resize", width, height);
        return Ok(image);
    }
    if width > cols || height > rows {
        warn!("Upscaling {}x{} to {}x{}", cols, rows, width, height);
    }
    debug!("Resizing {}x{} -> {}x{} ({})", cols, rows, width, height, filter);

    let resized = resize_rgb_data(image.into_raw(), cols, rows, width, height, filter)?;
    RgbImage::from_raw(width, height, resized)
        .ok_or_else(|| Error::Resize(format!("resized buffer does not match {}x{}", width, height)))
}
