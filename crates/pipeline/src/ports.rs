//! Port traits implemented by infrastructure crates.
//!
//! Stages never touch the filesystem or a template engine directly; they go
//! through these traits so the orchestration can be exercised against
//! in-memory doubles.

use std::path::{Path, PathBuf};

use crate::{DocGenError, DocType, Idea};

/// Persists rendered text.
pub trait ArtifactWriter: Send + Sync {
    /// Writes `text` to `path`, honouring the collision policy.
    ///
    /// Parent directories are created as needed. When `path` already exists
    /// and `overwrite` is `false`, the write is redirected to the same path
    /// with `.new` appended to its extension and the original is left alone.
    /// Returns the path actually written.
    fn write(&self, path: &Path, text: &str, overwrite: bool) -> Result<PathBuf, DocGenError>;

    /// Reads back a previously written artifact.
    fn read(&self, path: &Path) -> Result<String, DocGenError>;
}

/// Renders the named template for an artifact type against an idea.
///
/// Fails with [`DocGenError::Render`] when a field the template requires is absent.
pub trait TemplateRenderer: Send + Sync {
    fn render(&self, doc_type: DocType, idea: &Idea) -> Result<String, DocGenError>;
}
