use std::io::{self, Write};

use thiserror::Error;

/// Application-specific errors for the CLI
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Launcher(#[from] subloc::Error),
}

impl AppError {
    /// Usage errors exit with 2, everything else with 1.
    pub fn exit_code(&self) -> u8 {
        if self.is_usage() { 2 } else { 1 }
    }

    pub fn is_usage(&self) -> bool {
        matches!(self, AppError::Launcher(e) if e.is_usage())
    }

    /// Hint naming what the user should supply for a bad required argument.
    pub fn guidance(&self) -> Option<&'static str> {
        let arg = match self {
            AppError::Launcher(subloc::Error::MissingArgument { arg })
            | AppError::Launcher(subloc::Error::InvalidPath { arg, .. }) => *arg,
            _ => return None,
        };
        match arg {
            "-i/--seq" => Some("Provide an existing protein sequence file with -i/--seq <PATH>"),
            "-t/--tax" => Some("Provide an existing taxonomy classification file with -t/--tax <PATH>"),
            "-r/--outdir" => Some("Provide an existing results directory with -r/--outdir <DIR>"),
            _ => None,
        }
    }

    /// Write the error, and for usage errors the hint and usage line, to `w`.
    pub fn report<W: Write>(&self, usage: &str, w: &mut W) -> io::Result<()> {
        writeln!(w, "error: {}", self)?;
        if self.is_usage() {
            if let Some(hint) = self.guidance() {
                writeln!(w, "{}", hint)?;
            }
            writeln!(w)?;
            writeln!(w, "{}", usage.trim_end())?;
            writeln!(w)?;
            writeln!(w, "For more information, try '--help'.")?;
        }
        Ok(())
    }
}
