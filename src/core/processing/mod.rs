//! Per-frame image operations: rotation, resizing, padding, and the
//! normalization step that chains them.
pub mod normalize;
pub mod padding;
pub mod resize;
pub mod rotate;
