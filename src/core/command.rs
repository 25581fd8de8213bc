use std::borrow::Cow;
use std::process::Command;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::params::{InvocationOptions, LauncherConfig};
use crate::core::staging::StagedFile;
use crate::error::{Error, Result};

pub const ENV_SEQ: &str = "SEQ_FILE";
pub const ENV_TAX: &str = "TAX_FILE";
pub const ENV_FORMAT: &str = "FORMAT";
pub const ENV_CUTOFF: &str = "CUTOFF";
pub const ENV_DIVERGENT: &str = "DIVERGENT";
pub const ENV_OUTPUT: &str = "OUTPUT";
pub const ENV_EXACT: &str = "EXACT";
pub const ENV_VERBOSE: &str = "VERBOSE";
pub const ENV_VERSION: &str = "VERSION";

/// The single external invocation: program, arguments and the
/// container-side environment passed with `-e`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContainerCommand {
    pub program: String,
    pub args: Vec<String>,
    pub env: Vec<(String, String)>,
    pub image: String,
}

impl ContainerCommand {
    fn base(config: &LauncherConfig) -> (String, Vec<String>) {
        let runtime = config.runtime.program().to_string();
        let (program, mut args) = if config.sudo {
            ("sudo".to_string(), vec![runtime])
        } else {
            (runtime, Vec::new())
        };
        args.push("run".to_string());
        args.push("--rm".to_string());
        (program, args)
    }

    /// Build the prediction run for staged inputs. `staged` holds the sequence
    /// copy first and the taxonomy copy second.
    pub fn for_invocation(
        options: &InvocationOptions,
        staged: &[StagedFile; 2],
        config: &LauncherConfig,
    ) -> Self {
        let (program, mut args) = Self::base(config);
        args.push("-v".to_string());
        args.push(format!(
            "{}:{}",
            options.outdir.display(),
            config.mount_root()
        ));
        args.extend(config.extra_args.iter().cloned());

        let [seq, tax] = staged;
        let mut env = vec![
            (ENV_SEQ.to_string(), config.container_path(&seq.file_name())),
            (ENV_TAX.to_string(), config.container_path(&tax.file_name())),
        ];

        let flags = &options.flags;
        if let Some(format) = &flags.format {
            env.push((ENV_FORMAT.to_string(), format.clone()));
        }
        if let Some(cutoff) = flags.cutoff {
            env.push((ENV_CUTOFF.to_string(), cutoff.to_string()));
        }
        if let Some(divergent) = flags.divergent {
            env.push((ENV_DIVERGENT.to_string(), divergent.to_string()));
        }
        if let Some(output) = &flags.output {
            env.push((ENV_OUTPUT.to_string(), output.clone()));
        }
        if flags.exact {
            env.push((ENV_EXACT.to_string(), "1".to_string()));
        }
        if flags.verbose {
            env.push((ENV_VERBOSE.to_string(), "1".to_string()));
        }

        Self {
            program,
            args,
            env,
            image: config.image.clone(),
        }
    }

    /// Ask the packaged tool for its version. No mount, nothing staged.
    pub fn version_query(config: &LauncherConfig) -> Self {
        let (program, mut args) = Self::base(config);
        args.extend(config.extra_args.iter().cloned());
        Self {
            program,
            args,
            env: vec![(ENV_VERSION.to_string(), "1".to_string())],
            image: config.image.clone(),
        }
    }

    /// Full argument vector after the program name.
    pub fn argv(&self) -> Vec<String> {
        let mut argv = self.args.clone();
        for (key, value) in &self.env {
            argv.push("-e".to_string());
            argv.push(format!("{}={}", key, value));
        }
        argv.push(self.image.clone());
        argv
    }

    /// Shell-like rendering for logs and dry runs.
    pub fn render(&self) -> String {
        std::iter::once(self.program.clone())
            .chain(self.argv())
            .map(|s| shell_escape::escape(Cow::from(s)).into_owned())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Executes a `ContainerCommand` and blocks until it exits
pub trait CommandRunner {
    /// Returns the exit code, or `None` when the process was killed by a signal.
    fn run(&self, command: &ContainerCommand) -> Result<Option<i32>>;
}

/// Runs commands as real child processes, inheriting stdio
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, command: &ContainerCommand) -> Result<Option<i32>> {
        debug!("Executing: {}", command.render());
        let status = Command::new(&command.program)
            .args(command.argv())
            .status()
            .map_err(|e| Error::Spawn {
                program: command.program.clone(),
                source: e,
            })?;
        Ok(status.code())
    }
}
