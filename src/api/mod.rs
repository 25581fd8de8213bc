//! High-level library API: stage inputs, run the container once, clean up.
//! The CLI is a thin layer over these entry points.
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

use crate::core::command::{CommandRunner, ContainerCommand, SystemRunner};
use crate::core::params::{InvocationOptions, LauncherConfig};
use crate::core::staging::{StagedFile, occupied, stage_file, staged_name, unstage};
use crate::error::Result;

/// What a single launch did
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    pub command: String,
    pub staged: Vec<StagedFile>,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    /// Exit code of the external command; `None` if it could not be
    /// spawned or was killed by a signal. Informational only.
    pub exit_code: Option<i32>,
}

impl RunReport {
    pub fn elapsed(&self) -> chrono::Duration {
        self.finished_at - self.started_at
    }
}

/// Command that `launch` would execute, without staging anything.
pub fn plan(options: &InvocationOptions, config: &LauncherConfig) -> Result<ContainerCommand> {
    let seq = planned(&options.seq, &options.outdir)?;
    let tax = planned(&options.tax, &options.outdir)?;
    Ok(ContainerCommand::for_invocation(options, &[seq, tax], config))
}

fn planned(source: &Path, dir: &Path) -> Result<StagedFile> {
    let path = dir.join(staged_name(source)?);
    let created = !occupied(&path);
    Ok(StagedFile { path, created })
}

/// Stage inputs, run the packaged tool through the system container runtime,
/// then remove the copies made by this run.
pub fn launch(options: &InvocationOptions, config: &LauncherConfig) -> Result<RunReport> {
    launch_with(options, config, &SystemRunner)
}

/// Same as [`launch`] with a caller-supplied runner.
///
/// The external command's outcome never fails the launch: spawn errors and
/// non-zero exits are logged and recorded in the report. Staging and cleanup
/// I/O errors are returned.
pub fn launch_with<R: CommandRunner>(
    options: &InvocationOptions,
    config: &LauncherConfig,
    runner: &R,
) -> Result<RunReport> {
    let started_at = Utc::now();

    let seq = stage_file(&options.seq, &options.outdir)?;
    let tax = match stage_file(&options.tax, &options.outdir) {
        Ok(tax) => tax,
        Err(e) => {
            if let Err(cleanup) = unstage(std::slice::from_ref(&seq)) {
                warn!("{}", cleanup);
            }
            return Err(e);
        }
    };
    let staged = [seq, tax];

    let command = ContainerCommand::for_invocation(options, &staged, config);
    info!("Running: {}", command.render());

    let exit_code = match runner.run(&command) {
        Ok(Some(0)) => Some(0),
        Ok(Some(code)) => {
            warn!("{} exited with status {}", config.runtime, code);
            Some(code)
        }
        Ok(None) => {
            warn!("{} terminated by signal", config.runtime);
            None
        }
        Err(e) => {
            error!("{}", e);
            None
        }
    };

    unstage(&staged)?;

    let report = RunReport {
        command: command.render(),
        staged: staged.to_vec(),
        started_at,
        finished_at: Utc::now(),
        exit_code,
    };
    info!(
        "Launch finished in {} ms (exit code: {:?})",
        report.elapsed().num_milliseconds(),
        report.exit_code
    );

    Ok(report)
}

/// Ask the packaged tool for its version through the container runtime.
pub fn query_version<R: CommandRunner>(config: &LauncherConfig, runner: &R) -> Option<i32> {
    let command = ContainerCommand::version_query(config);
    info!("Running: {}", command.render());
    match runner.run(&command) {
        Ok(code) => code,
        Err(e) => {
            error!("{}", e);
            None
        }
    }
}
