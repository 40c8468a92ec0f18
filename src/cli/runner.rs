use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;
use tracing_subscriber::EnvFilter;

use timelapser::{Error, FrameRecord, TimelapseParams, build_timelapse_with_progress};

use super::args::CliArgs;
use super::errors::AppError;

fn init_logging(debug: bool) {
    let filter = if debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn to_dimension(arg: &'static str, value: i64) -> Result<u32, Error> {
    u32::try_from(value)
        .ok()
        .filter(|v| *v > 0)
        .ok_or(Error::InvalidDimension {
            arg,
            value: value.to_string(),
        })
}

fn to_positive<T: TryFrom<i64>>(arg: &'static str, value: i64) -> Result<T, Error> {
    if value <= 0 {
        return Err(Error::InvalidArgument {
            arg,
            value: value.to_string(),
        });
    }
    T::try_from(value).map_err(|_| Error::InvalidArgument {
        arg,
        value: value.to_string(),
    })
}

/// Builds run parameters: defaults, then the optional preset, then explicit flags.
pub fn params_from_args(args: &CliArgs) -> Result<TimelapseParams, Error> {
    let mut params = match &args.config {
        Some(path) => TimelapseParams::from_json_file(path)?,
        None => TimelapseParams::default(),
    };

    if let Some(width) = args.width {
        params.width = Some(to_dimension("width", width)?);
    }
    if let Some(height) = args.height {
        params.height = Some(to_dimension("height", height)?);
    }
    if let Some(rotation) = args.rotation {
        params.rotation = rotation;
    }
    if let Some(framerate) = args.framerate {
        params.framerate = to_positive("framerate", framerate)?;
    }
    if let Some(quality) = args.quality {
        params.quality = to_positive("quality", quality)?;
    }
    if let Some(extension) = &args.extension {
        params.extension = extension.clone();
    }
    if let Some(tolerance) = args.aspect_tolerance {
        params.aspect_tolerance = tolerance;
    }
    if let Some(filter) = args.filter {
        params.filter = filter;
    }
    if let Some(encoder) = args.encoder {
        params.encoder = encoder;
    }
    if args.encoder_bin.is_some() {
        params.encoder_bin = args.encoder_bin.clone();
    }
    if args.output.is_some() {
        params.output = args.output.clone();
    }
    if args.frames_dir.is_some() {
        params.frames_dir = args.frames_dir.clone();
    }

    params.validate()?;
    Ok(params)
}

/// Per-photo bar on stderr; length is set once the batch size is known.
fn frame_progress() -> Result<ProgressBar, AppError> {
    let pb = ProgressBar::new(0);
    let style = ProgressStyle::with_template("{spinner:.green} {bar:40.cyan/blue} {pos}/{len} {msg}")?;
    pb.set_style(style.progress_chars("##-"));
    Ok(pb)
}

fn advance(pb: &ProgressBar, done: usize, total: usize, record: &FrameRecord) {
    pb.set_length(total as u64);
    pb.set_position(done as u64);
    if let Some(name) = record.source.file_name() {
        pb.set_message(name.to_string_lossy().into_owned());
    }
    if done == total {
        pb.set_message("encoding");
    }
}

pub fn run(args: CliArgs) -> Result<(), AppError> {
    init_logging(args.log);

    let params = params_from_args(&args)?;
    let pb = frame_progress()?;
    let result = build_timelapse_with_progress(&args.path, &params, |done, total, record| {
        advance(&pb, done, total, record)
    });
    let report = match result {
        Ok(report) => {
            pb.finish_with_message("done");
            report
        }
        Err(e) => {
            pb.abandon();
            return Err(e.into());
        }
    };

    info!(
        "Timelapse {} @ {} fps, {} frames ({} padded) -> {:?}",
        report.frame, report.framerate, report.frame_count, report.padded_frames, report.output
    );
    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    }
    Ok(())
}
