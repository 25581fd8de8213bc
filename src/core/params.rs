use std::fs;
use std::path::{Component, Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::types::ContainerRuntime;

pub const DEFAULT_IMAGE: &str = "subloc:latest";
pub const DEFAULT_MOUNT_PATH: &str = "/data";

/// Container environment the launcher runs against, suitable for config files
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LauncherConfig {
    pub runtime: ContainerRuntime,
    /// Image reference passed to `<runtime> run`
    pub image: String,
    /// In-container path the output directory is bound to
    pub mount_path: String,
    /// Prefix the runtime invocation with `sudo`
    pub sudo: bool,
    /// Extra arguments inserted after `run --rm -v ...`, before the env vars
    pub extra_args: Vec<String>,
}

impl Default for LauncherConfig {
    fn default() -> Self {
        Self {
            runtime: ContainerRuntime::Docker,
            image: DEFAULT_IMAGE.to_string(),
            mount_path: DEFAULT_MOUNT_PATH.to_string(),
            sudo: true,
            extra_args: Vec::new(),
        }
    }
}

impl LauncherConfig {
    /// Load a JSON config file. Missing keys fall back to defaults.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path).map_err(|e| Error::Config {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        let config: LauncherConfig = serde_json::from_str(&raw).map_err(|e| Error::Config {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        if !config.mount_path.starts_with('/') {
            return Err(Error::Config {
                path: path.to_path_buf(),
                reason: format!("mount_path must be absolute, got {:?}", config.mount_path),
            });
        }

        Ok(config)
    }

    /// Mount path without a trailing separator (the root stays `/`).
    pub fn mount_root(&self) -> &str {
        match self.mount_path.trim_end_matches('/') {
            "" => "/",
            trimmed => trimmed,
        }
    }

    /// In-container path of a file placed at the top of the mounted directory.
    pub fn container_path(&self, file_name: &str) -> String {
        match self.mount_root() {
            "/" => format!("/{}", file_name),
            root => format!("{}/{}", root, file_name),
        }
    }
}

/// Flags forwarded untouched to the packaged tool
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PassThrough {
    pub format: Option<String>,
    pub cutoff: Option<f64>,
    pub divergent: Option<f64>,
    pub output: Option<String>,
    pub exact: bool,
    pub verbose: bool,
}

/// Validated, absolute paths and flags for a single launch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvocationOptions {
    pub seq: PathBuf,
    pub tax: PathBuf,
    /// Output directory, absolute and without a trailing separator
    pub outdir: PathBuf,
    pub flags: PassThrough,
}

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
enum Expect {
    File,
    Dir,
}

impl InvocationOptions {
    /// Validate the three required paths in order (sequence, taxonomy, output
    /// directory) and normalize them. Nothing on disk is touched.
    pub fn resolve(
        seq: Option<&Path>,
        tax: Option<&Path>,
        outdir: Option<&Path>,
        flags: PassThrough,
    ) -> Result<Self> {
        let seq = require("-i/--seq", seq, Expect::File)?;
        let tax = require("-t/--tax", tax, Expect::File)?;
        let outdir = require("-r/--outdir", outdir, Expect::Dir)?;

        Ok(Self {
            seq,
            tax,
            outdir,
            flags,
        })
    }
}

fn require(arg: &'static str, path: Option<&Path>, expect: Expect) -> Result<PathBuf> {
    let path = path.ok_or(Error::MissingArgument { arg })?;
    if path.as_os_str().is_empty() {
        return Err(Error::MissingArgument { arg });
    }

    let path = normalize(path)?;
    let ok = match expect {
        Expect::File => path.is_file(),
        Expect::Dir => path.is_dir(),
    };
    if !ok {
        let reason = match (expect, path.exists()) {
            (_, false) => "does not exist",
            (Expect::File, true) => "is not a file",
            (Expect::Dir, true) => "is not a directory",
        };
        return Err(Error::InvalidPath { arg, path, reason });
    }
    if path.to_str().is_none() {
        return Err(Error::InvalidPath {
            arg,
            path,
            reason: "is not valid UTF-8",
        });
    }

    Ok(path)
}

/// Absolute form of `path` with `.` and `..` folded lexically and any
/// trailing separator removed. Relative paths resolve against the current
/// directory; symlinks are not resolved.
pub fn normalize(path: &Path) -> Result<PathBuf> {
    let absolute = std::path::absolute(path)?;
    let mut folded = PathBuf::new();
    for component in absolute.components() {
        match component {
            Component::CurDir => {}
            // pop is a no-op at the root
            Component::ParentDir => {
                folded.pop();
            }
            other => folded.push(other),
        }
    }
    Ok(folded)
}
