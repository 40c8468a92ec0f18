//! Frame writers for the encoder working set.
pub mod jpeg;

pub use jpeg::write_rgb_jpeg;

/// `printf`-style pattern matching [`frame_file_name`], as understood by ffmpeg.
pub const FRAME_PATTERN: &str = "frame_%06d.jpg";
/// Shell glob matching every frame file.
pub const FRAME_GLOB: &str = "frame_*.jpg";

/// File name of the frame at zero-based `index`.
pub fn frame_file_name(index: usize) -> String {
    format!("frame_{:06}.jpg", index)
}
