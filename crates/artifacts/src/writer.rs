//! Collision-safe filesystem writer.

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use pipeline::{ArtifactWriter, DocGenError};
use tracing::{debug, info};

/// Suffix appended to a file name when a non-overwriting write collides.
pub const COLLISION_SUFFIX: &str = ".new";

/// Returns the redirect target for a colliding write: `path` with
/// [`COLLISION_SUFFIX`] appended to its extension (`brd_prd.md` becomes
/// `brd_prd.md.new`).
pub fn collision_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(OsString::from)
        .unwrap_or_default();
    name.push(COLLISION_SUFFIX);
    path.with_file_name(name)
}

/// [`ArtifactWriter`] backed by the local filesystem.
///
/// There is no locking. Two writers targeting the same path race; the `.new`
/// redirect is the only collision mitigation.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsArtifactWriter;

impl FsArtifactWriter {
    pub fn new() -> Self {
        Self
    }
}

impl ArtifactWriter for FsArtifactWriter {
    fn write(&self, path: &Path, text: &str, overwrite: bool) -> Result<PathBuf, DocGenError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| DocGenError::Write {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let target = if !overwrite && path.exists() {
            let redirected = collision_path(path);
            debug!(
                requested = %path.display(),
                actual = %redirected.display(),
                "Destination exists; redirecting write"
            );
            redirected
        } else {
            path.to_path_buf()
        };

        fs::write(&target, text).map_err(|source| DocGenError::Write {
            path: target.clone(),
            source,
        })?;
        info!(
            path = %target.display(),
            bytes = text.len(),
            redirected = target != path,
            "Artifact written"
        );
        Ok(target)
    }

    fn read(&self, path: &Path) -> Result<String, DocGenError> {
        fs::read_to_string(path).map_err(|source| DocGenError::Read {
            path: path.to_path_buf(),
            source,
        })
    }
}
