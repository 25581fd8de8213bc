use clap::Parser;
use std::path::PathBuf;

use subloc::{ContainerRuntime, LauncherConfig, PassThrough};

/// Flags marked required below are declared optional for clap so the runner
/// can print its own guidance for each missing one.
#[derive(Debug, Parser)]
#[command(
    name = "subloc",
    about = "Run the containerized protein subcellular localization predictor",
    disable_version_flag = true
)]
pub struct CliArgs {
    /// Input protein sequence file (required)
    #[arg(short = 'i', long = "seq", value_name = "PATH")]
    pub seq: Option<PathBuf>,

    /// Taxonomy classification file (required)
    #[arg(short = 't', long = "tax", value_name = "PATH")]
    pub tax: Option<PathBuf>,

    /// Local results directory, mounted into the container (required)
    #[arg(short = 'r', long = "outdir", value_name = "DIR")]
    pub outdir: Option<PathBuf>,

    /// Prediction cutoff passed to the tool
    #[arg(short = 'c', long)]
    pub cutoff: Option<f64>,

    /// Divergence cutoff passed to the tool
    #[arg(short = 'd', long)]
    pub divergent: Option<f64>,

    /// Input format passed to the tool
    #[arg(short = 'f', long)]
    pub format: Option<String>,

    /// Output style passed to the tool
    #[arg(short = 'o', long)]
    pub output: Option<String>,

    /// Exact mode
    #[arg(short = 'e', long, default_value_t = false)]
    pub exact: bool,

    /// Verbose output from the tool
    #[arg(short = 'v', long, default_value_t = false)]
    pub verbose: bool,

    /// Print the launcher version and query the packaged tool's version
    #[arg(long, default_value_t = false)]
    pub version: bool,

    /// JSON file with launcher settings (runtime, image, mount_path, sudo, extra_args)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Container image to run (overrides config)
    #[arg(long)]
    pub image: Option<String>,

    /// Container runtime (overrides config)
    #[arg(long, value_enum)]
    pub runtime: Option<ContainerRuntime>,

    /// Do not prefix the runtime with sudo
    #[arg(long, default_value_t = false)]
    pub no_sudo: bool,

    /// Print the container command without staging or running anything
    #[arg(long, default_value_t = false)]
    pub dry_run: bool,

    /// Enable debug logging
    #[arg(long, default_value_t = false)]
    pub log: bool,
}

impl CliArgs {
    pub fn pass_through(&self) -> PassThrough {
        PassThrough {
            format: self.format.clone(),
            cutoff: self.cutoff,
            divergent: self.divergent,
            output: self.output.clone(),
            exact: self.exact,
            verbose: self.verbose,
        }
    }

    /// Config file (or defaults) with command-line overrides applied.
    pub fn launcher_config(&self) -> subloc::Result<LauncherConfig> {
        let mut config = match &self.config {
            Some(path) => LauncherConfig::from_json_file(path)?,
            None => LauncherConfig::default(),
        };
        if let Some(image) = &self.image {
            config.image = image.clone();
        }
        if let Some(runtime) = self.runtime {
            config.runtime = runtime;
        }
        if self.no_sudo {
            config.sudo = false;
        }
        Ok(config)
    }
}
