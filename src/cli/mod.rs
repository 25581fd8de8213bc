//! Command Line Interface (CLI) layer for subloc.
//!
//! This module defines argument parsing (`args`), error types (`errors`),
//! and the orchestration logic (`runner`): validate, stage, run the
//! container once, clean up. The heavy lifting lives in `subloc::api`.
pub mod args;
pub mod errors;
pub mod runner;

pub use args::CliArgs;
pub use runner::run;
