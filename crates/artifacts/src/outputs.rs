//! Read-side helpers over the output directory: listing and showing documents.

use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};

use pipeline::DocGenError;

/// Every file under `dir`, as `/`-separated paths relative to `dir`, sorted.
///
/// A missing directory lists as empty.
pub fn list_outputs(dir: &Path) -> Result<Vec<String>, DocGenError> {
    let mut files = Vec::new();
    if dir.is_dir() {
        collect_files(dir, dir, &mut files).map_err(|source| DocGenError::Read {
            path: dir.to_path_buf(),
            source,
        })?;
    }
    files.sort();
    Ok(files)
}

/// Walks `dir` recursively, appending files relative to `root`.
pub(crate) fn collect_files(root: &Path, dir: &Path, out: &mut Vec<String>) -> io::Result<()> {
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if entry.file_type()?.is_dir() {
            collect_files(root, &path, out)?;
        } else if let Ok(relative) = path.strip_prefix(root) {
            out.push(relative_name(relative));
        }
    }
    Ok(())
}

fn relative_name(relative: &Path) -> String {
    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

/// Resolves `relative` inside `dir`, refusing anything that would escape it
/// (absolute paths, `..` components).
pub fn resolve_inside(dir: &Path, relative: &str) -> Option<PathBuf> {
    let relative = Path::new(relative);
    let escapes = relative
        .components()
        .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
    if escapes || relative.as_os_str().is_empty() {
        None
    } else {
        Some(dir.join(relative))
    }
}

/// Reads a document by its path relative to `dir`.
///
/// Returns `Ok(None)` when the file does not exist or the path escapes `dir`.
pub fn read_document(dir: &Path, relative: &str) -> Result<Option<String>, DocGenError> {
    let Some(path) = resolve_inside(dir, relative) else {
        return Ok(None);
    };
    if !path.is_file() {
        return Ok(None);
    }
    fs::read_to_string(&path)
        .map(Some)
        .map_err(|source| DocGenError::Read { path, source })
}
