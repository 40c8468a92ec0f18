//! Core building blocks: frame geometry and the tolerance policy, run
//! parameters, and the per-frame processing steps. These are consumed by the
//! high-level `api` module.
pub mod geometry;
pub mod params;
pub mod processing;
