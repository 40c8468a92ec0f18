//! Frame geometry: resolving the batch frame size, rotated bounds, and where
//! scaled content is placed inside a frame.
//!
//! Policy for conflicting width/height/aspect requests: the frame box is never
//! changed once resolved. If the content aspect ratio deviates from the frame
//! aspect ratio by at most `tolerance` (relative), the content is stretched to
//! fill the frame. Otherwise it is fitted inside the box, the constraining side
//! wins, and the rest is padded with black, centered.
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};
use crate::types::Fit;

pub const DEFAULT_FRAME_WIDTH: u32 = 1080;
pub const DEFAULT_FRAME_HEIGHT: u32 = 720;
/// Maximum relative aspect-ratio deviation that is stretched instead of padded.
pub const DEFAULT_ASPECT_TOLERANCE: f64 = 0.01;
/// Largest frame side a baseline JPEG can describe.
pub const MAX_FRAME_SIDE: u32 = u16::MAX as u32;

const ANGLE_EPSILON: f64 = 1e-9;

/// Exact output dimensions shared by every frame of a batch.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct FrameSize {
    pub width: u32,
    pub height: u32,
}

/// Rejects a zero side or one larger than [`MAX_FRAME_SIDE`].
pub fn check_side(arg: &'static str, value: u32) -> Result<u32> {
    if value == 0 {
        return Err(Error::InvalidDimension {
            arg,
            value: value.to_string(),
        });
    }
    if value > MAX_FRAME_SIDE {
        return Err(Error::InvalidDimension {
            arg,
            value: format!("{} exceeds JPEG limit of {}", value, MAX_FRAME_SIDE),
        });
    }
    Ok(value)
}

impl FrameSize {
    pub fn new(width: u32, height: u32) -> Result<Self> {
        Ok(Self {
            width: check_side("width", width)?,
            height: check_side("height", height)?,
        })
    }

    pub fn aspect_ratio(&self) -> f64 {
        self.width as f64 / self.height as f64
    }
}

impl Default for FrameSize {
    fn default() -> Self {
        Self {
            width: DEFAULT_FRAME_WIDTH,
            height: DEFAULT_FRAME_HEIGHT,
        }
    }
}

impl std::fmt::Display for FrameSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Requested output geometry, possibly incomplete.
#[derive(Copy, Clone, PartialEq, Debug, Default, Serialize, Deserialize)]
pub struct GeometryRequest {
    pub width: Option<u32>,
    pub height: Option<u32>,
    /// Clockwise rotation in degrees.
    pub rotation: f64,
}

impl GeometryRequest {
    pub fn new(width: Option<u32>, height: Option<u32>, rotation: f64) -> Self {
        Self {
            width,
            height,
            rotation,
        }
    }

    /// Resolves against a source of `source_width` x `source_height` before rotation.
    pub fn resolve(&self, source_width: u32, source_height: u32) -> Result<FrameSize> {
        let reference = rotated_dimensions(source_width, source_height, self.rotation);
        resolve_frame_size(self.width, self.height, reference)
    }
}

/// Completes a partial width/height request from the `reference` aspect ratio.
///
/// With neither side given the default 1080x720 is used. A single given side
/// derives the other as `round(side * ratio)`, never less than one pixel.
pub fn resolve_frame_size(
    width: Option<u32>,
    height: Option<u32>,
    reference: (u32, u32),
) -> Result<FrameSize> {
    let (ref_w, ref_h) = reference;
    match (width, height) {
        (Some(w), Some(h)) => FrameSize::new(w, h),
        (None, None) => Ok(FrameSize::default()),
        (Some(w), None) => {
            check_reference(ref_w, ref_h)?;
            let derived = (w as f64 * ref_h as f64 / ref_w as f64).round().max(1.0) as u32;
            debug!("Derived height {} from width {} and reference {}x{}", derived, w, ref_w, ref_h);
            FrameSize::new(w, derived)
        }
        (None, Some(h)) => {
            check_reference(ref_w, ref_h)?;
            let derived = (h as f64 * ref_w as f64 / ref_h as f64).round().max(1.0) as u32;
            debug!("Derived width {} from height {} and reference {}x{}", derived, h, ref_w, ref_h);
            FrameSize::new(derived, h)
        }
    }
}

fn check_reference(width: u32, height: u32) -> Result<()> {
    if width == 0 || height == 0 {
        return Err(Error::InvalidDimension {
            arg: "reference image",
            value: format!("{}x{}", width, height),
        });
    }
    Ok(())
}

/// Number of clockwise quarter turns when `degrees` is a multiple of 90.
pub fn quarter_turns(degrees: f64) -> Option<u32> {
    let normalized = degrees.rem_euclid(360.0);
    let quarters = (normalized / 90.0).round();
    if (normalized - quarters * 90.0).abs() < ANGLE_EPSILON {
        Some(quarters as u32 % 4)
    } else {
        None
    }
}

/// Bounding box of a `width` x `height` image rotated by `degrees`.
pub fn rotated_dimensions(width: u32, height: u32, degrees: f64) -> (u32, u32) {
    match quarter_turns(degrees) {
        Some(0) | Some(2) => (width, height),
        Some(_) => (height, width),
        None => {
            let radians = degrees.to_radians();
            let (sin, cos) = (radians.sin().abs(), radians.cos().abs());
            let (w, h) = (width as f64, height as f64);
            // Shave float noise so an exact fit does not grow by a pixel
            let new_w = (w * cos + h * sin - 1e-6).ceil().max(1.0) as u32;
            let new_h = (w * sin + h * cos - 1e-6).ceil().max(1.0) as u32;
            (new_w, new_h)
        }
    }
}

/// Where scaled content lands inside a frame.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct Placement {
    pub frame: FrameSize,
    pub content_width: u32,
    pub content_height: u32,
    pub pad_left: u32,
    pub pad_top: u32,
    pub fit: Fit,
}

impl Placement {
    pub fn pad_right(&self) -> u32 {
        self.frame.width - self.content_width - self.pad_left
    }

    pub fn pad_bottom(&self) -> u32 {
        self.frame.height - self.content_height - self.pad_top
    }

    pub fn is_padded(&self) -> bool {
        self.content_width != self.frame.width || self.content_height != self.frame.height
    }
}

/// Relative deviation of `source` aspect ratio from `target`.
pub fn aspect_deviation(source_width: u32, source_height: u32, frame: FrameSize) -> f64 {
    let source_ar = source_width as f64 / source_height as f64;
    let target_ar = frame.aspect_ratio();
    (source_ar - target_ar).abs() / target_ar
}

pub fn plan_placement(
    source_width: u32,
    source_height: u32,
    frame: FrameSize,
    tolerance: f64,
) -> Result<Placement> {
    check_reference(source_width, source_height)?;

    let deviation = aspect_deviation(source_width, source_height, frame);
    if deviation <= tolerance {
        return Ok(Placement {
            frame,
            content_width: frame.width,
            content_height: frame.height,
            pad_left: 0,
            pad_top: 0,
            fit: Fit::Fill,
        });
    }

    let (src_w, src_h) = (source_width as f64, source_height as f64);
    let (fit, content_width, content_height) =
        if src_w * frame.height as f64 > src_h * frame.width as f64 {
            // Wider than the frame: width constrains
            let h = (frame.width as f64 * src_h / src_w).round() as u32;
            (Fit::Letterbox, frame.width, h.clamp(1, frame.height))
        } else {
            let w = (frame.height as f64 * src_w / src_h).round() as u32;
            (Fit::Pillarbox, w.clamp(1, frame.width), frame.height)
        };
    if (content_width, content_height) == (frame.width, frame.height) {
        // Off by less than a pixel once rounded: no band to draw
        return Ok(Placement {
            frame,
            content_width,
            content_height,
            pad_left: 0,
            pad_top: 0,
            fit: Fit::Fill,
        });
    }

    debug!(
        "Aspect ratio not conserved ({:.1}% off): {}x{} content in {} frame, {}",
        deviation * 100.0,
        content_width,
        content_height,
        frame,
        fit
    );

    Ok(Placement {
        frame,
        content_width,
        content_height,
        pad_left: (frame.width - content_width) / 2,
        pad_top: (frame.height - content_height) / 2,
        fit,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(w: u32, h: u32) -> FrameSize {
        FrameSize::new(w, h).unwrap()
    }

    #[test]
    fn zero_sides_are_rejected() {
        assert!(matches!(
            FrameSize::new(0, 720),
            Err(Error::InvalidDimension { arg: "width", .. })
        ));
        assert!(matches!(
            FrameSize::new(1080, 0),
            Err(Error::InvalidDimension { arg: "height", .. })
        ));
        assert!(resolve_frame_size(Some(0), None, (100, 100)).is_err());
    }

    #[test]
    fn sides_beyond_the_jpeg_limit_are_rejected() {
        assert!(FrameSize::new(MAX_FRAME_SIDE, MAX_FRAME_SIDE).is_ok());
        assert!(matches!(
            FrameSize::new(MAX_FRAME_SIDE + 1, 720),
            Err(Error::InvalidDimension { arg: "width", .. })
        ));
        assert!(matches!(
            resolve_frame_size(Some(100_000), Some(100_000), (100, 100)),
            Err(Error::InvalidDimension { .. })
        ));
        // Derived from a very wide reference: 60000 * 100000 / 10
        assert!(matches!(
            resolve_frame_size(None, Some(60_000), (100_000, 10)),
            Err(Error::InvalidDimension { arg: "width", .. })
        ));
    }

    #[test]
    fn neither_side_defaults_to_1080x720() {
        let size = resolve_frame_size(None, None, (4000, 3000)).unwrap();
        assert_eq!(size, frame(1080, 720));
    }

    #[test]
    fn width_only_derives_height_from_reference() {
        assert_eq!(
            resolve_frame_size(Some(800), None, (1600, 1200)).unwrap(),
            frame(800, 600)
        );
        // 1080 * 1080 / 1920 = 607.5
        assert_eq!(
            resolve_frame_size(Some(1080), None, (1920, 1080)).unwrap(),
            frame(1080, 608)
        );
    }

    #[test]
    fn derived_side_keeps_aspect_within_a_pixel() {
        for &(w, h) in &[(1920, 1080), (3000, 2000), (1234, 567), (333, 1000), (7, 3)] {
            for &target in &[64u32, 320, 1000, 1337] {
                let size = resolve_frame_size(Some(target), None, (w, h)).unwrap();
                let exact = target as f64 * h as f64 / w as f64;
                assert!((size.height as f64 - exact).abs() <= 1.0, "{w}x{h} -> {size}");

                let size = resolve_frame_size(None, Some(target), (w, h)).unwrap();
                let exact = target as f64 * w as f64 / h as f64;
                assert!((size.width as f64 - exact).abs() <= 1.0, "{w}x{h} -> {size}");
            }
        }
    }

    #[test]
    fn tiny_derived_side_is_at_least_one_pixel() {
        assert_eq!(
            resolve_frame_size(Some(10), None, (10_000, 10)).unwrap(),
            frame(10, 1)
        );
    }

    #[test]
    fn request_resolves_against_rotated_source() {
        let request = GeometryRequest::new(Some(600), None, 90.0);
        assert_eq!(request.resolve(1200, 800).unwrap(), frame(600, 900));
    }

    #[test]
    fn quarter_turns_detects_right_angles() {
        assert_eq!(quarter_turns(0.0), Some(0));
        assert_eq!(quarter_turns(90.0), Some(1));
        assert_eq!(quarter_turns(-90.0), Some(3));
        assert_eq!(quarter_turns(540.0), Some(2));
        assert_eq!(quarter_turns(45.0), None);
        assert_eq!(quarter_turns(90.5), None);
    }

    #[test]
    fn rotated_bounds() {
        assert_eq!(rotated_dimensions(400, 300, 0.0), (400, 300));
        assert_eq!(rotated_dimensions(400, 300, 270.0), (300, 400));
        assert_eq!(rotated_dimensions(400, 300, 180.0), (400, 300));
        // 45 degrees: (400 + 300) / sqrt(2) = 494.97
        assert_eq!(rotated_dimensions(400, 300, 45.0), (495, 495));
    }

    #[test]
    fn matching_aspect_fills_the_frame() {
        let p = plan_placement(1600, 1200, frame(800, 600), DEFAULT_ASPECT_TOLERANCE).unwrap();
        assert_eq!(p.fit, Fit::Fill);
        assert_eq!((p.content_width, p.content_height), (800, 600));
        assert!(!p.is_padded());
    }

    #[test]
    fn deviation_within_tolerance_is_stretched() {
        // 1.5 vs 1.509: 0.6% off
        let p = plan_placement(1509, 1000, frame(1080, 720), DEFAULT_ASPECT_TOLERANCE).unwrap();
        assert_eq!(p.fit, Fit::Fill);
    }

    #[test]
    fn zero_tolerance_pads_any_mismatch() {
        let p = plan_placement(1509, 1000, frame(1080, 720), 0.0).unwrap();
        assert_eq!(p.fit, Fit::Letterbox);
    }

    #[test]
    fn sub_pixel_mismatch_rounds_to_fill() {
        // 3x2 frame, 1000x667 source: the band would be 0.001 px
        let p = plan_placement(1000, 667, frame(3, 2), 0.0).unwrap();
        assert_eq!(p.fit, Fit::Fill);
        assert!(!p.is_padded());
        assert_eq!((p.pad_left, p.pad_top), (0, 0));
    }

    #[test]
    fn full_hd_into_default_frame_is_letterboxed() {
        let p = plan_placement(1920, 1080, FrameSize::default(), DEFAULT_ASPECT_TOLERANCE).unwrap();
        assert_eq!(p.fit, Fit::Letterbox);
        assert_eq!((p.content_width, p.content_height), (1080, 608));
        assert_eq!(p.pad_top, 56);
        assert_eq!(p.pad_bottom(), 56);
        assert_eq!(p.pad_left, 0);
    }

    #[test]
    fn wide_source_in_4_3_frame_gets_centered_bands() {
        let p = plan_placement(800, 400, frame(800, 600), DEFAULT_ASPECT_TOLERANCE).unwrap();
        assert_eq!(p.fit, Fit::Letterbox);
        assert_eq!((p.content_width, p.content_height), (800, 400));
        assert_eq!((p.pad_top, p.pad_bottom()), (100, 100));
    }

    #[test]
    fn portrait_source_is_pillarboxed() {
        let p = plan_placement(3000, 4000, frame(1080, 720), DEFAULT_ASPECT_TOLERANCE).unwrap();
        assert_eq!(p.fit, Fit::Pillarbox);
        assert_eq!((p.content_width, p.content_height), (540, 720));
        assert_eq!((p.pad_left, p.pad_right()), (270, 270));
    }

    #[test]
    fn odd_padding_puts_the_extra_pixel_right_and_bottom() {
        let p = plan_placement(100, 51, frame(100, 100), 0.0).unwrap();
        assert_eq!(p.content_height, 51);
        assert_eq!(p.pad_top, 24);
        assert_eq!(p.pad_bottom(), 25);
    }
}
