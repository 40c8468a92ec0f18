use std::path::{Path, PathBuf};

use image::{DynamicImage, ImageReader};
use serde::Serialize;
use tracing::debug;

use crate::error::{Error, Result};

/// A source photo on disk and its native dimensions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceImage {
    pub path: PathBuf,
    pub width: u32,
    pub height: u32,
}

impl SourceImage {
    /// Reads only the image header to learn the native size.
    pub fn read_header(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let (width, height) =
            image::image_dimensions(path).map_err(|e| Error::from_image(path, e))?;
        Ok(Self {
            path: path.to_path_buf(),
            width,
            height,
        })
    }

    pub fn load(&self) -> Result<DynamicImage> {
        load_image(&self.path)
    }
}

/// Decodes a full image. The file handle is released before returning.
pub fn load_image(path: &Path) -> Result<DynamicImage> {
    let reader = ImageReader::open(path)
        .and_then(|r| r.with_guessed_format())
        .map_err(|source| Error::Read {
            path: path.to_path_buf(),
            source,
        })?;
    reader.decode().map_err(|e| Error::from_image(path, e))
}

fn has_extension(path: &Path, extension: &str) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(extension))
}

/// Lists files in `dir` ending in `.extension` (any case), sorted by file name.
pub fn discover_sources(dir: &Path, extension: &str) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(Error::InvalidSourceDir {
            path: dir.to_path_buf(),
        });
    }
    let extension = extension.trim_start_matches('.');

    let mut sources = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(|source| Error::Read {
        path: dir.to_path_buf(),
        source,
    })? {
        let path = entry?.path();
        if path.is_dir() {
            debug!("Skipping directory: {:?}", path);
            continue;
        }
        if has_extension(&path, extension) {
            sources.push(path);
        }
    }

    if sources.is_empty() {
        return Err(Error::NoImages {
            dir: dir.to_path_buf(),
            extension: extension.to_string(),
        });
    }
    sources.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(sources)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_matching_files_sorted_and_case_insensitive() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["b.jpg", "a.JPG", "c.png", "notes.txt", "d.jpeg"] {
            std::fs::write(dir.path().join(name), b"x").unwrap();
        }
        std::fs::create_dir(dir.path().join("sub.jpg")).unwrap();

        let found = discover_sources(dir.path(), ".jpg").unwrap();
        let names: Vec<_> = found
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, ["a.JPG", "b.jpg"]);
    }

    #[test]
    fn empty_match_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a.png"), b"x").unwrap();
        assert!(matches!(
            discover_sources(dir.path(), "jpg"),
            Err(Error::NoImages { .. })
        ));
    }

    #[test]
    fn missing_directory_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope");
        assert!(matches!(
            discover_sources(&missing, "jpg"),
            Err(Error::InvalidSourceDir { .. })
        ));
    }

    #[test]
    fn header_gives_native_size() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.png");
        image::RgbImage::new(17, 9).save(&path).unwrap();

        let src = SourceImage::read_header(&path).unwrap();
        assert_eq!((src.width, src.height), (17, 9));
        assert_eq!(src.load().unwrap().width(), 17);
    }

    #[test]
    fn header_of_missing_file_is_a_read_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            SourceImage::read_header(dir.path().join("gone.jpg")),
            Err(Error::Read { .. })
        ));
    }

    #[test]
    fn garbage_is_a_format_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.jpg");
        std::fs::write(&path, b"definitely not a jpeg").unwrap();
        assert!(matches!(
            SourceImage::read_header(&path),
            Err(Error::Format { .. })
        ));
    }
}
