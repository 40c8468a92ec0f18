//! Shared enums used across timelapser.
//! Includes `EncoderKind` (which external program assembles the video),
//! `ResizeFilter` (scaling kernel) and `Fit` (how content sits inside a frame).
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

#[derive(
    Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Debug, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum EncoderKind {
    #[default]
    Ffmpeg,
    Mencoder,
}

impl EncoderKind {
    /// Executable name looked up on PATH when no override is given.
    pub fn program(&self) -> &'static str {
        match self {
            EncoderKind::Ffmpeg => "ffmpeg",
            EncoderKind::Mencoder => "mencoder",
        }
    }
}

impl std::fmt::Display for EncoderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.program())
    }
}

#[derive(
    Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Debug, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum ResizeFilter {
    Nearest,
    Bilinear,
    CatmullRom,
    #[default]
    Lanczos3,
}

impl std::fmt::Display for ResizeFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResizeFilter::Nearest => write!(f, "Nearest"),
            ResizeFilter::Bilinear => write!(f, "Bilinear"),
            ResizeFilter::CatmullRom => write!(f, "CatmullRom"),
            ResizeFilter::Lanczos3 => write!(f, "Lanczos3"),
        }
    }
}

/// How scaled content is laid out inside the frame.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Fit {
    /// Content covers the whole frame (aspect ratios within tolerance).
    Fill,
    /// Bands above and below.
    Letterbox,
    /// Bands left and right.
    Pillarbox,
}

impl std::fmt::Display for Fit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Fit::Fill => write!(f, "Fill"),
            Fit::Letterbox => write!(f, "Letterbox"),
            Fit::Pillarbox => write!(f, "Pillarbox"),
        }
    }
}
