use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use image::RgbImage;
use jpeg_encoder::{ColorType, Encoder};

use crate::core::geometry::MAX_FRAME_SIDE;
use crate::error::{Error, Result};

fn write_error(output: &Path, source: std::io::Error) -> Error {
    Error::Write {
        path: output.to_path_buf(),
        source,
    }
}

pub fn write_rgb_jpeg(output: &Path, image: &RgbImage, quality: u8) -> Result<()> {
    let (cols, rows) = image.dimensions();
    if cols > MAX_FRAME_SIDE || rows > MAX_FRAME_SIDE {
        return Err(Error::InvalidDimension {
            arg: "frame",
            value: format!("{}x{} exceeds JPEG limit of {}", cols, rows, MAX_FRAME_SIDE),
        });
    }

    let file = File::create(output).map_err(|e| write_error(output, e))?;
    let mut writer = BufWriter::new(file);
    let encoder = Encoder::new(&mut writer, quality);
    encoder
        .encode(image.as_raw(), cols as u16, rows as u16, ColorType::Rgb)
        .map_err(|e| write_error(output, std::io::Error::other(e.to_string())))?;
    writer.flush().map_err(|e| write_error(output, e))?;
    Ok(())
}
