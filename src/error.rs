//! Crate-level error type and `Result` alias.
//! Covers argument validation, staging/cleanup I/O, config loading and
//! process spawning.
use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Missing required argument: {arg}")]
    MissingArgument { arg: &'static str },

    #[error("Invalid argument: {arg}={}: {reason}", .path.display())]
    InvalidPath {
        arg: &'static str,
        path: PathBuf,
        reason: &'static str,
    },

    #[error("Failed to stage {} into {}: {source}", .src.display(), .dest.display())]
    Stage {
        src: PathBuf,
        dest: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to remove staged file {}: {source}", .path.display())]
    Unstage {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Config error ({}): {reason}", .path.display())]
    Config { path: PathBuf, reason: String },

    #[error("Failed to spawn {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    /// True for errors caused by bad user input rather than the environment.
    pub fn is_usage(&self) -> bool {
        matches!(
            self,
            Error::MissingArgument { .. } | Error::InvalidPath { .. }
        )
    }
}
