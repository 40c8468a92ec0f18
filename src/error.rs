//! Crate-level error type and `Result` alias for stable, structured error handling.
//! Separates I/O failures on source and destination files, image format problems,
//! configuration mistakes, and failures of the external video encoder.
use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Cannot read {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Cannot write {path:?}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Unsupported or corrupt image {path:?}: {reason}")]
    Format { path: PathBuf, reason: String },

    #[error("Resize error: {0}")]
    Resize(String),

    #[error("Invalid {arg}: {value} (must be a positive pixel count)")]
    InvalidDimension { arg: &'static str, value: String },

    #[error("Invalid argument: {arg}={value}")]
    InvalidArgument { arg: &'static str, value: String },

    #[error("Source directory {path:?} does not exist or is not a directory")]
    InvalidSourceDir { path: PathBuf },

    #[error("No *.{extension} images found in {dir:?}")]
    NoImages { dir: PathBuf, extension: String },

    #[error("Invalid configuration file {path:?}: {reason}")]
    Config { path: PathBuf, reason: String },

    #[error("Video encoder '{program}' not found; is it installed and on PATH?")]
    EncoderNotFound { program: String },

    #[error("Video encoder '{program}' failed ({status}): {stderr}")]
    EncoderFailed {
        program: String,
        status: String,
        stderr: String,
    },
}

impl Error {
    /// Classifies an `image` crate failure on `path` as either an I/O or a format error.
    pub fn from_image(path: impl Into<PathBuf>, err: image::ImageError) -> Self {
        let path = path.into();
        match err {
            image::ImageError::IoError(source) => Error::Read { path, source },
            other => Error::Format {
                path,
                reason: other.to_string(),
            },
        }
    }

    pub fn resize<E: std::fmt::Display>(e: E) -> Self {
        Error::Resize(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn image_io_errors_become_read_errors() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err = Error::from_image("a.jpg", image::ImageError::IoError(io));
        assert!(matches!(err, Error::Read { .. }));
    }

    #[test]
    fn other_image_errors_become_format_errors() {
        let err = Error::from_image(
            "a.jpg",
            image::ImageError::Unsupported(image::error::UnsupportedError::from_format_and_kind(
                image::error::ImageFormatHint::Unknown,
                image::error::UnsupportedErrorKind::GenericFeature("x".to_string()),
            )),
        );
        match err {
            Error::Format { path, .. } => assert_eq!(path, PathBuf::from("a.jpg")),
            other => panic!("unexpected {other:?}"),
        }
    }
}
