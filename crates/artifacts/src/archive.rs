//! Packages the output directory into a single ZIP archive.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use pipeline::DocGenError;
use tracing::info;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::outputs::collect_files;

/// Writes every file under `dir` into a deflate ZIP at `archive`, using paths
/// relative to `dir` as entry names. Returns `archive`.
///
/// An `archive` located inside `dir` is skipped so re-packaging does not nest
/// the previous archive.
pub fn package_outputs(dir: &Path, archive: &Path) -> Result<PathBuf, DocGenError> {
    let fail = |message: String| DocGenError::Archive {
        path: archive.to_path_buf(),
        message,
    };

    let mut entries = Vec::new();
    if dir.is_dir() {
        collect_files(dir, dir, &mut entries).map_err(|e| fail(e.to_string()))?;
    }
    entries.sort();
    let skip = archive
        .strip_prefix(dir)
        .ok()
        .map(|p| p.to_string_lossy().replace('\\', "/"));

    if let Some(parent) = archive.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| fail(e.to_string()))?;
    }
    let file = File::create(archive).map_err(|e| fail(e.to_string()))?;
    let mut zip = ZipWriter::new(file);
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    let mut packaged = 0usize;
    for name in entries.iter().filter(|n| Some(*n) != skip.as_ref()) {
        let bytes = fs::read(dir.join(name)).map_err(|e| fail(e.to_string()))?;
        zip.start_file(name.as_str(), options)
            .map_err(|e| fail(e.to_string()))?;
        zip.write_all(&bytes).map_err(|e| fail(e.to_string()))?;
        packaged += 1;
    }
    zip.finish().map_err(|e| fail(e.to_string()))?;

    info!(archive = %archive.display(), files = packaged, "Outputs packaged");
    Ok(archive.to_path_buf())
}
