#![doc = r#"
timelapser — turn a directory of still photos into a timelapse video.

Every photo is rotated, scaled and padded with black to one shared frame size,
written as a numbered JPEG into a working set, and the working set is handed to
an external encoder (`ffmpeg` or `mencoder`) that produces a Motion-JPEG AVI.

Frame geometry
--------------
- Width and height given: the frame is exactly that size. Content whose aspect
  ratio is within 1% (configurable) of the frame's is stretched to fill it;
  anything else is fitted inside and centered between black bands.
- One side given: the other is derived from the first photo's aspect ratio.
- Neither given: 1080x720.
- Rotation is applied before scaling.

Quick start: normalize one image in memory
------------------------------------------
```rust,no_run
use timelapser::{GeometryRequest, NormalizeOptions, normalize_image};

fn main() -> timelapser::Result<()> {
    let img = image::open("/photos/IMG_0001.jpg").map_err(|e| {
        timelapser::Error::from_image("/photos/IMG_0001.jpg", e)
    })?;
    let frame = normalize_image(
        img,
        &GeometryRequest::new(Some(800), Some(600), 0.0),
        &NormalizeOptions::default(),
    )?;
    assert_eq!((frame.width(), frame.height()), (800, 600));
    Ok(())
}
```

Full run
--------
```rust,no_run
use std::path::Path;
use timelapser::{TimelapseParams, build_timelapse};

fn main() -> timelapser::Result<()> {
    let params = TimelapseParams {
        width: Some(1920),
        framerate: 12,
        ..Default::default()
    };
    let report = build_timelapse(Path::new("/photos/garden"), &params)?;
    println!("{} frames -> {:?}", report.frame_count, report.output);
    Ok(())
}
```

Error handling
--------------
All public functions return `timelapser::Result<T>`. `Error::Read`/`Error::Write`
are I/O failures, `Error::Format` an unsupported or corrupt image, the
`Invalid*` variants configuration mistakes, and `Error::Encoder*` failures of
the external encoder. Any error aborts the whole run.
"#]

pub mod api;
pub mod core;
pub mod error;
pub mod io;
pub mod types;

pub use crate::core::geometry::{FrameSize, GeometryRequest, Placement};
pub use crate::core::params::TimelapseParams;
pub use crate::core::processing::normalize::{
    NormalizeOptions, NormalizedFrame, normalize_image, normalize_to_frame,
};
pub use error::{Error, Result};
pub use types::{EncoderKind, Fit, ResizeFilter};

pub use io::SourceImage;

pub use api::{
    BatchReport, FrameRecord, TimelapseReport, build_timelapse, build_timelapse_with_progress,
    normalize_batch, normalize_batch_with_progress,
};
