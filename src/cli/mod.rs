//! Command Line Interface (CLI) layer for timelapser.
//!
//! This module defines argument parsing (`args`), error types (`errors`),
//! and the orchestration logic (`runner`): merge flags over an optional JSON
//! preset, set up logging, and run the library's directory-to-video flow.
//!
//! If you are embedding timelapser into another application, prefer using
//! the high-level `timelapser::api` module instead of calling the CLI code.
pub mod args;
pub mod errors;
pub mod runner;

pub use args::CliArgs;
pub use runner::run;
