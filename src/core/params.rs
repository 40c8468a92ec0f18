use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::core::geometry::{DEFAULT_ASPECT_TOLERANCE, GeometryRequest, check_side};
use crate::core::processing::normalize::NormalizeOptions;
use crate::error::{Error, Result};
use crate::types::{EncoderKind, ResizeFilter};

pub const DEFAULT_FRAMERATE: u32 = 7;
pub const DEFAULT_EXTENSION: &str = "jpg";
pub const DEFAULT_JPEG_QUALITY: u8 = 95;

/// Run-scoped parameters, suitable for JSON presets and threaded explicitly
/// through every normalization and encoding call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimelapseParams {
    /// Frame width in pixels; derived from the first image when only height is set
    pub width: Option<u32>,
    /// Frame height in pixels; derived from the first image when only width is set
    pub height: Option<u32>,
    /// Clockwise rotation in degrees, applied before scaling
    pub rotation: f64,
    pub framerate: u32,
    /// Source file extension, matched case-insensitively
    pub extension: String,
    /// Relative aspect-ratio deviation stretched instead of padded
    pub aspect_tolerance: f64,
    pub filter: ResizeFilter,
    /// JPEG quality of the intermediate frames (1-100)
    pub quality: u8,
    pub encoder: EncoderKind,
    /// Encoder executable; defaults to the encoder's program name on PATH
    pub encoder_bin: Option<PathBuf>,
    /// Output video; defaults to `timelapse_{W}x{H}_{F}fps.avi` in the source directory
    pub output: Option<PathBuf>,
    /// Keep normalized frames here instead of a temporary directory
    pub frames_dir: Option<PathBuf>,
}

impl Default for TimelapseParams {
    fn default() -> Self {
        Self {
            width: None,
            height: None,
            rotation: 0.0,
            framerate: DEFAULT_FRAMERATE,
            extension: DEFAULT_EXTENSION.to_string(),
            aspect_tolerance: DEFAULT_ASPECT_TOLERANCE,
            filter: ResizeFilter::default(),
            quality: DEFAULT_JPEG_QUALITY,
            encoder: EncoderKind::default(),
            encoder_bin: None,
            output: None,
            frames_dir: None,
        }
    }
}

impl TimelapseParams {
    /// Loads a JSON preset; missing fields keep their defaults.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| Error::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|e| Error::Config {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }

    pub fn validate(&self) -> Result<()> {
        if let Some(width) = self.width {
            check_side("width", width)?;
        }
        if let Some(height) = self.height {
            check_side("height", height)?;
        }
        if self.framerate == 0 {
            return Err(Error::InvalidArgument {
                arg: "framerate",
                value: self.framerate.to_string(),
            });
        }
        if !self.rotation.is_finite() {
            return Err(Error::InvalidArgument {
                arg: "rotation",
                value: self.rotation.to_string(),
            });
        }
        if !self.aspect_tolerance.is_finite()
            || self.aspect_tolerance < 0.0
            || self.aspect_tolerance >= 1.0
        {
            return Err(Error::InvalidArgument {
                arg: "aspect_tolerance",
                value: self.aspect_tolerance.to_string(),
            });
        }
        if !(1..=100).contains(&self.quality) {
            return Err(Error::InvalidArgument {
                arg: "quality",
                value: self.quality.to_string(),
            });
        }
        if self.extension.trim_start_matches('.').is_empty() {
            return Err(Error::InvalidArgument {
                arg: "extension",
                value: self.extension.clone(),
            });
        }
        Ok(())
    }

    pub fn geometry(&self) -> GeometryRequest {
        GeometryRequest::new(self.width, self.height, self.rotation)
    }

    pub fn normalize_options(&self) -> NormalizeOptions {
        NormalizeOptions {
            aspect_tolerance: self.aspect_tolerance,
            filter: self.filter,
        }
    }

    /// Extension without a leading dot.
    pub fn extension(&self) -> &str {
        self.extension.trim_start_matches('.')
    }

    /// Program actually executed for the configured encoder.
    pub fn encoder_program(&self) -> PathBuf {
        self.encoder_bin
            .clone()
            .unwrap_or_else(|| PathBuf::from(self.encoder.program()))
    }
}
