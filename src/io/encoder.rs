//! External video encoder invocation.
//!
//! Both supported encoders turn the numbered JPEG frames of the working set
//! into a Motion-JPEG AVI at the requested framerate.
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use tracing::{debug, info};

use crate::core::geometry::FrameSize;
use crate::error::{Error, Result};
use crate::io::writers::{FRAME_GLOB, FRAME_PATTERN};
use crate::types::EncoderKind;

const STDERR_TAIL_LINES: usize = 20;

/// Everything the encoder needs to assemble one video.
#[derive(Debug, Clone)]
pub struct EncodeJob {
    pub frames_dir: PathBuf,
    pub frame_count: usize,
    pub frame: FrameSize,
    pub framerate: u32,
    pub output: PathBuf,
}

/// `timelapse_{W}x{H}_{F}fps.avi`
pub fn default_video_name(frame: FrameSize, framerate: u32) -> String {
    format!(
        "timelapse_{}x{}_{}fps.avi",
        frame.width, frame.height, framerate
    )
}

pub fn encoder_args(kind: EncoderKind, job: &EncodeJob) -> Vec<OsString> {
    let mut args: Vec<OsString> = Vec::new();
    match kind {
        EncoderKind::Ffmpeg => {
            let input = job.frames_dir.join(FRAME_PATTERN);
            args.extend(
                ["-y", "-hide_banner", "-loglevel", "error", "-framerate"]
                    .into_iter()
                    .map(OsString::from),
            );
            args.push(job.framerate.to_string().into());
            args.push("-start_number".into());
            args.push("0".into());
            args.push("-i".into());
            args.push(input.into_os_string());
            args.push("-frames:v".into());
            args.push(job.frame_count.to_string().into());
            args.extend(
                ["-c:v", "mjpeg", "-q:v", "2"]
                    .into_iter()
                    .map(OsString::from),
            );
            args.push(job.output.clone().into_os_string());
        }
        EncoderKind::Mencoder => {
            let mut input = OsString::from("mf://");
            input.push(job.frames_dir.join(FRAME_GLOB));
            args.push(input);
            args.push("-mf".into());
            args.push(
                format!(
                    "type=jpg:w={}:h={}:fps={}",
                    job.frame.width, job.frame.height, job.framerate
                )
                .into(),
            );
            args.extend(
                ["-ovc", "lavc", "-lavcopts", "vcodec=mjpeg", "-oac", "copy", "-o"]
                    .into_iter()
                    .map(OsString::from),
            );
            args.push(job.output.clone().into_os_string());
        }
    }
    args
}

pub fn encoder_command(program: &Path, kind: EncoderKind, job: &EncodeJob) -> Command {
    let mut command = Command::new(program);
    command
        .args(encoder_args(kind, job))
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());
    command
}

fn stderr_tail(stderr: &[u8]) -> String {
    let text = String::from_utf8_lossy(stderr);
    let lines: Vec<&str> = text.lines().collect();
    let start = lines.len().saturating_sub(STDERR_TAIL_LINES);
    lines[start..].join("\n")
}

fn discard_partial_output(output: &Path) {
    if output.exists() {
        if let Err(e) = std::fs::remove_file(output) {
            debug!("Could not remove partial output {:?}: {}", output, e);
        }
    }
}

/// Runs the encoder to completion. On failure no output file is left behind.
pub fn run_encoder(program: &Path, kind: EncoderKind, job: &EncodeJob) -> Result<()> {
    let program_name = program.display().to_string();
    info!(
        "Assembling {} frames at {} fps with {} -> {:?}",
        job.frame_count, job.framerate, program_name, job.output
    );

    let mut command = encoder_command(program, kind, job);
    debug!("Encoder command: {:?}", command);
    let output = match command.output() {
        Ok(output) => output,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(Error::EncoderNotFound {
                program: program_name,
            });
        }
        Err(e) => return Err(Error::Io(e)),
    };

    if !output.stdout.is_empty() {
        debug!("{}", String::from_utf8_lossy(&output.stdout));
    }

    if !output.status.success() {
        discard_partial_output(&job.output);
        return Err(Error::EncoderFailed {
            program: program_name,
            status: output.status.to_string(),
            stderr: stderr_tail(&output.stderr),
        });
    }
    if !job.output.is_file() {
        return Err(Error::EncoderFailed {
            program: program_name,
            status: output.status.to_string(),
            stderr: format!("no output written to {:?}", job.output),
        });
    }
    Ok(())
}
