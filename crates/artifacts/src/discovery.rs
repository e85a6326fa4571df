//! Output-directory discovery.
//!
//! Execution environments differ in which directories are writable (read-only
//! installs, sandboxed servers, containers). Discovery walks an ordered list
//! of candidates and returns the first one that can be created and written to.

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use pipeline::DocGenError;
use tracing::{debug, warn};

const PROBE_FILE_NAME: &str = ".docgen_write_probe";

/// A probe file that is removed when the guard goes out of scope, whichever
/// way the probing code exits.
struct WriteProbe {
    path: PathBuf,
}

impl WriteProbe {
    fn create(dir: &Path) -> io::Result<Self> {
        let path = dir.join(PROBE_FILE_NAME);
        let mut file = File::create(&path)?;
        let probe = Self { path };
        file.write_all(b"probe")?;
        file.sync_all()?;
        Ok(probe)
    }
}

impl Drop for WriteProbe {
    fn drop(&mut self) {
        if let Err(e) = fs::remove_file(&self.path) {
            debug!(path = %self.path.display(), error = %e, "Failed to remove write probe");
        }
    }
}

fn probe(dir: &Path) -> io::Result<()> {
    fs::create_dir_all(dir)?;
    let _probe = WriteProbe::create(dir)?;
    Ok(())
}

/// The default candidate list, most preferred first:
///
/// 1. `<cwd>/outputs`
/// 2. `<directory of the running executable>/outputs`
/// 3. `<home>/docgen_outputs`
pub fn default_candidates() -> Vec<PathBuf> {
    let mut candidates = Vec::new();
    if let Ok(cwd) = std::env::current_dir() {
        candidates.push(cwd.join("outputs"));
    }
    if let Some(exe_dir) = std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
    {
        candidates.push(exe_dir.join("outputs"));
    }
    if let Some(home) = dirs::home_dir() {
        candidates.push(home.join("docgen_outputs"));
    }
    candidates
}

/// Returns the first candidate that can be created and written to.
pub fn discover_output_dir(candidates: &[PathBuf]) -> Result<PathBuf, DocGenError> {
    for candidate in candidates {
        match probe(candidate) {
            Ok(()) => {
                debug!(dir = %candidate.display(), "Output directory selected");
                return Ok(candidate.clone());
            }
            Err(e) => {
                warn!(dir = %candidate.display(), error = %e, "Output directory not writable");
            }
        }
    }
    Err(DocGenError::OutputDirectoryUnavailable {
        tried: candidates.to_vec(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_writable_candidate_wins_and_probe_is_cleaned_up() {
        let tmp = tempfile::tempdir().unwrap();
        let blocker = tmp.path().join("not_a_dir");
        fs::write(&blocker, "file").unwrap();

        let candidates = vec![blocker.join("outputs"), tmp.path().join("second")];
        let chosen = discover_output_dir(&candidates).unwrap();

        assert_eq!(chosen, tmp.path().join("second"));
        assert!(chosen.is_dir());
        assert!(!chosen.join(PROBE_FILE_NAME).exists());
    }

    #[test]
    fn no_writable_candidate_is_an_error_naming_every_attempt() {
        let tmp = tempfile::tempdir().unwrap();
        let blocker = tmp.path().join("file");
        fs::write(&blocker, "file").unwrap();

        let err = discover_output_dir(&[blocker.join("a"), blocker.join("b")]).unwrap_err();
        match err {
            DocGenError::OutputDirectoryUnavailable { tried } => assert_eq!(tried.len(), 2),
            other => panic!("unexpected error {other}"),
        }
    }
}
