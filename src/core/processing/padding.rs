use image::{Rgb, RgbImage};
use tracing::debug;

use crate::core::geometry::Placement;
use crate::error::{Error, Result};

/// Fill color of letterbox/pillarbox bands.
pub const PAD_COLOR: Rgb<u8> = Rgb([0, 0, 0]);

/// Places `content` on a black canvas of the placement's frame size.
pub fn pad_to_frame(content: &RgbImage, placement: &Placement) -> Result<RgbImage> {
    let (cols, rows) = content.dimensions();
    if (cols, rows) != (placement.content_width, placement.content_height) {
        return Err(Error::Resize(format!(
            "content is {}x{}, placement expects {}x{}",
            cols, rows, placement.content_width, placement.content_height
        )));
    }
    if !placement.is_padded() {
        return Ok(content.clone());
    }

    let frame_cols = placement.frame.width as usize;
    let frame_rows = placement.frame.height as usize;
    let (pad_cols, pad_rows) = (placement.pad_left as usize, placement.pad_top as usize);
    debug!(
        "Adding padding: content={}x{}, pad_left={}, pad_top={}, frame={}",
        cols, rows, pad_cols, pad_rows, placement.frame
    );

    let row_bytes = cols as usize * 3;
    let mut padded = vec![0u8; frame_cols * frame_rows * 3];
    let src = content.as_raw();
    // Copy per row using slice copies to minimize per-pixel indexing
    for row in 0..rows as usize {
        let src_offset = row * row_bytes;
        let dst_offset = ((row + pad_rows) * frame_cols + pad_cols) * 3;
        padded[dst_offset..dst_offset + row_bytes]
            .copy_from_slice(&src[src_offset..src_offset + row_bytes]);
    }

    RgbImage::from_raw(placement.frame.width, placement.frame.height, padded)
        .ok_or_else(|| Error::Resize("padded buffer does not match frame size".to_string()))
}
