use clap::Parser;
use std::path::PathBuf;

use timelapser::{EncoderKind, ResizeFilter};

#[derive(Parser, Debug)]
#[command(
    name = "timelapser",
    version,
    about = "Assemble a timelapse video from a directory of photos",
    allow_negative_numbers = true
)]
pub struct CliArgs {
    /// Folder containing the pictures
    pub path: PathBuf,

    /// Rotation angle to apply, in degrees clockwise
    #[arg(short, long, value_name = "ALPHA")]
    pub rotation: Option<f64>,

    /// Frame width in pixels (derived from the first picture if only height is given)
    #[arg(short, long)]
    pub width: Option<i64>,

    /// Frame height in pixels (derived from the first picture if only width is given)
    #[arg(short = 't', long)]
    pub height: Option<i64>,

    /// Framerate of the timelapse [default: 7]
    #[arg(short, long)]
    pub framerate: Option<i64>,

    /// File extension to look for [default: jpg]
    #[arg(short, long)]
    pub extension: Option<String>,

    /// Output video [default: <PATH>/timelapse_<W>x<H>_<F>fps.avi]
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Video encoder to run
    #[arg(long, value_enum)]
    pub encoder: Option<EncoderKind>,

    /// Path to the encoder executable, if not on PATH
    #[arg(long)]
    pub encoder_bin: Option<PathBuf>,

    /// Resampling filter used for scaling
    #[arg(long, value_enum)]
    pub filter: Option<ResizeFilter>,

    /// JPEG quality of intermediate frames, 1-100 [default: 95]
    #[arg(long)]
    pub quality: Option<i64>,

    /// Relative aspect-ratio mismatch stretched instead of padded [default: 0.01]
    #[arg(long)]
    pub aspect_tolerance: Option<f64>,

    /// Keep normalized frames in this (empty or new) directory
    #[arg(long)]
    pub frames_dir: Option<PathBuf>,

    /// JSON preset with default parameters; flags override it
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Print the run report as JSON on stdout
    #[arg(long, default_value_t = false)]
    pub json: bool,

    /// Enable debug logging
    #[arg(long, default_value_t = false)]
    pub log: bool,
}
