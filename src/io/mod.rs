//! I/O layer: discovering and decoding source photos, writing normalized
//! frames, and driving the external video encoder.
pub mod encoder;
pub mod source;
pub mod writers;

pub use encoder::{EncodeJob, default_video_name, run_encoder};
pub use source::{SourceImage, discover_sources, load_image};
