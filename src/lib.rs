#![doc = r#"
subloc — launcher for a containerized protein subcellular localization predictor.

The predictor itself ships inside a container image and is run unmodified. This crate
does the plumbing around it: validate and normalize the input paths, stage the
sequence and taxonomy files into the results directory, run the image once with that
directory mounted, and remove the copies it made.

Requirements
------------
- A container runtime (`docker` or `podman`) on `PATH`, and `sudo` unless disabled.
- The predictor image available locally or pullable (default `subloc:latest`).

Quick start
-----------
```rust,no_run
use std::path::Path;
use subloc::{InvocationOptions, LauncherConfig, PassThrough, launch};

fn main() -> subloc::Result<()> {
    let options = InvocationOptions::resolve(
        Some(Path::new("proteins.fasta")),
        Some(Path::new("taxonomy.csv")),
        Some(Path::new("results/")),
        PassThrough { cutoff: Some(0.5), ..Default::default() },
    )?;

    let report = launch(&options, &LauncherConfig::default())?;
    println!("ran: {} (exit code {:?})", report.command, report.exit_code);
    Ok(())
}
```

Inspect the command without running it
--------------------------------------
```rust,no_run
use std::path::Path;
use subloc::{InvocationOptions, LauncherConfig, PassThrough, plan};

fn main() -> subloc::Result<()> {
    let options = InvocationOptions::resolve(
        Some(Path::new("proteins.fasta")),
        Some(Path::new("taxonomy.csv")),
        Some(Path::new("results")),
        PassThrough::default(),
    )?;
    println!("{}", plan(&options, &LauncherConfig::default())?.render());
    Ok(())
}
```

Error handling
--------------
All fallible functions return `subloc::Result<T>`. The external tool's own exit status is
never turned into an error; it is reported in [`RunReport::exit_code`].

Useful modules
--------------
- [`api`] — `launch`, `plan`, `query_version` and [`RunReport`].
- [`core`] — parameters, staging, command construction and runners.
- [`types`] — `ContainerRuntime`.
- [`error`] — crate-level `Error` and `Result`.
"#]

pub mod api;
pub mod core;
pub mod error;
pub mod types;

pub use crate::core::command::{CommandRunner, ContainerCommand, SystemRunner};
pub use crate::core::params::{InvocationOptions, LauncherConfig, PassThrough};
pub use crate::core::staging::{StagedFile, stage_file, unstage};
pub use crate::error::{Error, Result};
pub use crate::types::ContainerRuntime;

pub use crate::api::{RunReport, launch, launch_with, plan, query_version};
