//! Frame normalization: rotate, scale and pad one image to an exact frame size.
use image::{DynamicImage, RgbImage};
use serde::{Deserialize, Serialize};

use crate::core::geometry::{
    DEFAULT_ASPECT_TOLERANCE, FrameSize, GeometryRequest, Placement, plan_placement,
};
use crate::core::processing::padding::pad_to_frame;
use crate::core::processing::resize::resize_rgb;
use crate::core::processing::rotate::rotate_rgb;
use crate::error::Result;
use crate::types::{Fit, ResizeFilter};

/// Knobs that do not change the frame size itself.
#[derive(Copy, Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct NormalizeOptions {
    pub aspect_tolerance: f64,
    pub filter: ResizeFilter,
}

impl Default for NormalizeOptions {
    fn default() -> Self {
        Self {
            aspect_tolerance: DEFAULT_ASPECT_TOLERANCE,
            filter: ResizeFilter::default(),
        }
    }
}

/// An RGB frame of exactly `placement.frame` dimensions.
#[derive(Debug, Clone)]
pub struct NormalizedFrame {
    pub image: RgbImage,
    pub placement: Placement,
}

impl NormalizedFrame {
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn frame_size(&self) -> FrameSize {
        self.placement.frame
    }

    pub fn fit(&self) -> Fit {
        self.placement.fit
    }
}

/// Normalizes a single image, resolving any missing side from the image itself.
pub fn normalize_image(
    image: DynamicImage,
    request: &GeometryRequest,
    options: &NormalizeOptions,
) -> Result<NormalizedFrame> {
    let frame = request.resolve(image.width(), image.height())?;
    normalize_to_frame(image, frame, request.rotation, options)
}

/// Normalizes into a frame size already fixed for the batch.
pub fn normalize_to_frame(
    image: DynamicImage,
    frame: FrameSize,
    rotation: f64,
    options: &NormalizeOptions,
) -> Result<NormalizedFrame> {
    let rotated = rotate_rgb(image.into_rgb8(), rotation);
    let (cols, rows) = rotated.dimensions();

    let placement = plan_placement(cols, rows, frame, options.aspect_tolerance)?;
    let scaled = resize_rgb(
        rotated,
        placement.content_width,
        placement.content_height,
        options.filter,
    )?;
    let image = pad_to_frame(&scaled, &placement)?;

    Ok(NormalizedFrame { image, placement })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::processing::padding::PAD_COLOR;
    use image::Rgb;

    fn solid(cols: u32, rows: u32) -> DynamicImage {
        DynamicImage::ImageRgb8(RgbImage::from_pixel(cols, rows, Rgb([200, 60, 30])))
    }

    #[test]
    fn default_request_yields_1080x720() {
        let out = normalize_image(
            solid(1920, 1080),
            &GeometryRequest::default(),
            &Default::default(),
        )
        .unwrap();
        assert_eq!((out.width(), out.height()), (1080, 720));
        assert_eq!(out.fit(), Fit::Letterbox);
        assert_eq!(*out.image.get_pixel(540, 10), PAD_COLOR);
        assert_eq!(*out.image.get_pixel(540, 710), PAD_COLOR);
    }

    #[test]
    fn width_only_needs_no_padding() {
        let request = GeometryRequest::new(Some(300), None, 0.0);
        let out = normalize_image(solid(1200, 800), &request, &Default::default()).unwrap();
        assert_eq!((out.width(), out.height()), (300, 200));
        assert_eq!(out.fit(), Fit::Fill);
    }

    #[test]
    fn rotation_happens_before_scaling() {
        let request = GeometryRequest::new(None, Some(400), 90.0);
        let out = normalize_image(solid(600, 300), &request, &Default::default()).unwrap();
        // Rotated source is 300x600, so width derives to 200
        assert_eq!((out.width(), out.height()), (200, 400));
        assert_eq!(out.fit(), Fit::Fill);
    }

    #[test]
    fn zero_rotation_same_size_keeps_pixels() {
        let src = RgbImage::from_fn(16, 12, |x, y| Rgb([x as u8 * 10, y as u8 * 10, 5]));
        let frame = FrameSize::new(16, 12).unwrap();
        let out = normalize_to_frame(
            DynamicImage::ImageRgb8(src.clone()),
            frame,
            0.0,
            &Default::default(),
        )
        .unwrap();
        assert_eq!(out.image, src);
    }

    #[test]
    fn every_frame_in_a_mixed_batch_has_the_same_size() {
        let frame = FrameSize::new(320, 240).unwrap();
        let sources = [solid(640, 480), solid(1920, 1080), solid(300, 900), solid(50, 50)];
        for src in sources {
            let out = normalize_to_frame(src, frame, 15.0, &Default::default()).unwrap();
            assert_eq!((out.width(), out.height()), (320, 240));
        }
    }

    #[test]
    fn zero_dimension_request_is_rejected() {
        let request = GeometryRequest::new(Some(0), Some(100), 0.0);
        assert!(normalize_image(solid(10, 10), &request, &Default::default()).is_err());
    }
}
