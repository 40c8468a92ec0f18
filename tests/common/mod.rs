//! Shared fixtures: small synthetic photos written into temp directories.
#![allow(dead_code)]

use std::path::{Path, PathBuf};

use image::{Rgb, RgbImage};

pub const CONTENT: Rgb<u8> = Rgb([220, 180, 40]);

/// Writes a solid-color JPEG of `cols` x `rows` named `name` into `dir`.
pub fn write_photo(dir: &Path, name: &str, cols: u32, rows: u32) -> PathBuf {
    let path = dir.join(name);
    RgbImage::from_pixel(cols, rows, CONTENT)
        .save(&path)
        .expect("Failed to write fixture photo");
    path
}

pub fn is_dark(p: &Rgb<u8>) -> bool {
    p.0.iter().all(|&c| c <= 12)
}

pub fn is_content(p: &Rgb<u8>) -> bool {
    p.0.iter().zip(CONTENT.0).all(|(&got, want)| got.abs_diff(want) <= 12)
}
