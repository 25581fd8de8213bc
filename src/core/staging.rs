use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{Error, Result};

/// A copy of an input placed into the mounted directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StagedFile {
    /// Path inside the output directory
    pub path: PathBuf,
    /// True only when this run made the copy; pre-existing files are never removed
    pub created: bool,
}

impl StagedFile {
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

/// Base name an input is staged under. Names that are not valid UTF-8 are
/// rejected since they cannot be passed to the container unchanged.
pub(crate) fn staged_name(source: &Path) -> Result<&str> {
    let name = source.file_name().ok_or_else(|| Error::InvalidPath {
        arg: "input",
        path: source.to_path_buf(),
        reason: "has no file name",
    })?;
    name.to_str().ok_or_else(|| Error::InvalidPath {
        arg: "input",
        path: source.to_path_buf(),
        reason: "is not valid UTF-8",
    })
}

/// True when anything, including a dangling symlink, sits at `dest`.
pub(crate) fn occupied(dest: &Path) -> bool {
    fs::symlink_metadata(dest).is_ok()
}

/// Copy `source` into `dir` under its base name unless an entry of that name
/// already exists there.
pub fn stage_file(source: &Path, dir: &Path) -> Result<StagedFile> {
    let dest = dir.join(staged_name(source)?);
    if occupied(&dest) {
        return Ok(kept(source, dest));
    }

    let mut reader = File::open(source).map_err(|e| stage_error(source, &dest, e))?;
    // create_new refuses to follow a symlink or replace anything created
    // since the check above
    let mut writer = match OpenOptions::new().write(true).create_new(true).open(&dest) {
        Ok(f) => f,
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists => return Ok(kept(source, dest)),
        Err(e) => return Err(stage_error(source, &dest, e)),
    };
    if let Err(e) = io::copy(&mut reader, &mut writer) {
        drop(writer);
        if let Err(cleanup) = fs::remove_file(&dest) {
            warn!("Failed to remove partial copy {:?}: {}", dest, cleanup);
        }
        return Err(stage_error(source, &dest, e));
    }
    info!("Staged {:?} -> {:?}", source, dest);

    Ok(StagedFile {
        path: dest,
        created: true,
    })
}

fn kept(source: &Path, dest: PathBuf) -> StagedFile {
    debug!("Keeping existing {:?}, not staging {:?}", dest, source);
    StagedFile {
        path: dest,
        created: false,
    }
}

fn stage_error(source: &Path, dest: &Path, e: io::Error) -> Error {
    Error::Stage {
        src: source.to_path_buf(),
        dest: dest.to_path_buf(),
        source: e,
    }
}

/// Remove the copies this run created, leaving everything else in place.
/// Stops at the first failure.
pub fn unstage(staged: &[StagedFile]) -> Result<()> {
    for file in staged.iter().filter(|f| f.created) {
        fs::remove_file(&file.path).map_err(|e| Error::Unstage {
            path: file.path.clone(),
            source: e,
        })?;
        info!("Removed staged {:?}", file.path);
    }
    Ok(())
}
