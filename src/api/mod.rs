//! High-level library API: normalize a list of photos into a working set of
//! identical frames, or run the whole directory-to-video flow. Prefer these
//! entrypoints over the low-level processing modules when embedding timelapser.
use std::path::{Path, PathBuf};

use serde::Serialize;
use tempfile::TempDir;
use tracing::{debug, info, warn};

use crate::core::geometry::FrameSize;
use crate::core::params::TimelapseParams;
use crate::core::processing::normalize::normalize_to_frame;
use crate::error::{Error, Result};
use crate::io::encoder::{EncodeJob, default_video_name, run_encoder};
use crate::io::source::{SourceImage, discover_sources, load_image};
use crate::io::writers::{frame_file_name, write_rgb_jpeg};
use crate::types::{EncoderKind, Fit};

/// One source photo and the frame it became.
#[derive(Debug, Clone, Serialize)]
pub struct FrameRecord {
    pub source: PathBuf,
    pub frame: PathBuf,
    pub fit: Fit,
}

/// Result of normalizing a batch into a working set
#[derive(Debug, Clone, Serialize)]
pub struct BatchReport {
    pub frame: FrameSize,
    pub frames: Vec<FrameRecord>,
}

impl BatchReport {
    pub fn padded(&self) -> usize {
        self.frames.iter().filter(|f| f.fit != Fit::Fill).count()
    }
}

/// Result of a full directory-to-video run
#[derive(Debug, Clone, Serialize)]
pub struct TimelapseReport {
    pub source_dir: PathBuf,
    pub output: PathBuf,
    pub frame: FrameSize,
    pub framerate: u32,
    pub frame_count: usize,
    pub padded_frames: usize,
    pub encoder: EncoderKind,
    /// Set when normalized frames were kept on disk
    pub frames_dir: Option<PathBuf>,
}

/// Resolves the batch frame size from the first source, as rotated.
pub fn resolve_batch_frame(first: &Path, params: &TimelapseParams) -> Result<FrameSize> {
    let reference = SourceImage::read_header(first)?;
    if reference.width < reference.height {
        info!("Pictures are vertical ({}x{})", reference.width, reference.height);
    }
    params.geometry().resolve(reference.width, reference.height)
}

/// Normalizes every source, in order, into `frames_dir` as numbered JPEGs.
///
/// The first failure aborts the batch; frames already written are left for
/// the caller to discard.
pub fn normalize_batch(
    sources: &[PathBuf],
    frames_dir: &Path,
    params: &TimelapseParams,
) -> Result<BatchReport> {
    normalize_batch_with_progress(sources, frames_dir, params, |_, _, _| {})
}

/// Same as [`normalize_batch`], calling `on_frame(done, total, record)` after
/// each frame is written.
pub fn normalize_batch_with_progress<F>(
    sources: &[PathBuf],
    frames_dir: &Path,
    params: &TimelapseParams,
    mut on_frame: F,
) -> Result<BatchReport>
where
    F: FnMut(usize, usize, &FrameRecord),
{
    params.validate()?;
    let first = sources.first().ok_or_else(|| Error::InvalidArgument {
        arg: "sources",
        value: "empty".to_string(),
    })?;

    let frame = resolve_batch_frame(first, params)?;
    let options = params.normalize_options();
    info!(
        "Normalizing {} pictures to {} (rotation {} deg, {} filter)",
        sources.len(),
        frame,
        params.rotation,
        params.filter
    );

    let mut frames = Vec::with_capacity(sources.len());
    let mut warned = false;
    for (index, source) in sources.iter().enumerate() {
        let image = load_image(source)?;
        let normalized = normalize_to_frame(image, frame, params.rotation, &options)?;

        if normalized.placement.is_padded() && !warned {
            warn!(
                "Aspect ratio not conserved for {:?}: adding black bands ({})",
                source,
                normalized.fit()
            );
            warned = true;
        }

        let target = frames_dir.join(frame_file_name(index));
        write_rgb_jpeg(&target, &normalized.image, params.quality)?;
        debug!(
            "[{}/{}] {:?} -> {:?} ({})",
            index + 1,
            sources.len(),
            source,
            target,
            normalized.fit()
        );

        let record = FrameRecord {
            source: source.clone(),
            frame: target,
            fit: normalized.fit(),
        };
        on_frame(index + 1, sources.len(), &record);
        frames.push(record);
    }

    Ok(BatchReport { frame, frames })
}

enum WorkingSet {
    Temporary(TempDir),
    Kept(PathBuf),
}

impl WorkingSet {
    fn create(params: &TimelapseParams) -> Result<Self> {
        match &params.frames_dir {
            Some(dir) => {
                std::fs::create_dir_all(dir).map_err(|source| Error::Write {
                    path: dir.clone(),
                    source,
                })?;
                if std::fs::read_dir(dir)?.next().is_some() {
                    return Err(Error::InvalidArgument {
                        arg: "frames_dir",
                        value: format!("{} is not empty", dir.display()),
                    });
                }
                Ok(WorkingSet::Kept(dir.clone()))
            }
            None => {
                let temp = tempfile::Builder::new()
                    .prefix("timelapser-")
                    .tempdir()?;
                debug!("Working set: {:?}", temp.path());
                Ok(WorkingSet::Temporary(temp))
            }
        }
    }

    fn path(&self) -> &Path {
        match self {
            WorkingSet::Temporary(temp) => temp.path(),
            WorkingSet::Kept(dir) => dir,
        }
    }

    fn finish(self) -> Result<Option<PathBuf>> {
        match self {
            WorkingSet::Temporary(temp) => {
                temp.close()?;
                Ok(None)
            }
            WorkingSet::Kept(dir) => Ok(Some(dir)),
        }
    }
}

/// Turns every matching photo in `source_dir` into one timelapse video.
pub fn build_timelapse(source_dir: &Path, params: &TimelapseParams) -> Result<TimelapseReport> {
    build_timelapse_with_progress(source_dir, params, |_, _, _| {})
}

/// Same as [`build_timelapse`], reporting each normalized frame to `on_frame`
/// as [`normalize_batch_with_progress`] does.
pub fn build_timelapse_with_progress<F>(
    source_dir: &Path,
    params: &TimelapseParams,
    on_frame: F,
) -> Result<TimelapseReport>
where
    F: FnMut(usize, usize, &FrameRecord),
{
    params.validate()?;

    let sources = discover_sources(source_dir, params.extension())?;
    info!("Found {} pictures in {:?}", sources.len(), source_dir);

    let working_set = WorkingSet::create(params)?;
    let batch = normalize_batch_with_progress(&sources, working_set.path(), params, on_frame)?;

    let output = params.output.clone().unwrap_or_else(|| {
        source_dir.join(default_video_name(batch.frame, params.framerate))
    });
    if output.exists() {
        info!("Removing existing {:?}", output);
        std::fs::remove_file(&output).map_err(|source| Error::Write {
            path: output.clone(),
            source,
        })?;
    }

    let job = EncodeJob {
        frames_dir: working_set.path().to_path_buf(),
        frame_count: batch.frames.len(),
        frame: batch.frame,
        framerate: params.framerate,
        output: output.clone(),
    };
    run_encoder(&params.encoder_program(), params.encoder, &job)?;
    let frames_dir = working_set.finish()?;

    info!("All done: {:?}", output);
    Ok(TimelapseReport {
        source_dir: source_dir.to_path_buf(),
        output,
        frame: batch.frame,
        framerate: params.framerate,
        frame_count: batch.frames.len(),
        padded_frames: batch.padded(),
        encoder: params.encoder,
        frames_dir,
    })
}
