//! Top-level error type for the generation domain.
//!
//! [`DocGenError`] covers every condition that aborts a generation request:
//! invalid input, rendering failures, filesystem failures, and unknown profiles.
//! None of them is retried. Correction-layer persistence failures are not
//! represented here; the correction pass logs them and carries on.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that abort a generation request.
///
/// The tool surfaces convert any of these into a `{success: false, error}`
/// envelope; the CLI prints them and exits non-zero.
#[derive(Debug, Error)]
pub enum DocGenError {
    /// The idea description is malformed or incomplete.
    ///
    /// Produced before any stage runs.
    #[error("Invalid idea: {message}")]
    InvalidIdea {
        /// What was wrong with the input.
        message: String,
    },

    /// A template could not be rendered, typically because a required field
    /// it references is blank.
    ///
    /// Aborts the remaining stages; files written by earlier stages stay on disk.
    #[error("Failed to render template '{template}': {message}")]
    Render {
        /// Template that failed.
        template: String,
        /// Renderer diagnostic.
        message: String,
    },

    /// Writing an artifact (or creating its parent directories) failed.
    #[error("Failed to write '{}': {source}", path.display())]
    Write {
        /// Path the write was attempted against.
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Reading a previously written artifact failed.
    #[error("Failed to read '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The requested profile name is not one of the fixed profiles.
    #[error("Unknown profile: {name}. Available: {}", available.join(", "))]
    UnknownProfile {
        /// Name that was asked for.
        name: String,
        /// Every valid profile name, in definition order.
        available: Vec<String>,
    },

    /// None of the candidate output directories could be written to.
    #[error("No writable output directory among: {}", display_paths(tried))]
    OutputDirectoryUnavailable {
        /// Candidates probed, in order.
        tried: Vec<PathBuf>,
    },

    /// Packaging the output directory into an archive failed.
    #[error("Failed to package outputs into '{}': {message}", path.display())]
    Archive { path: PathBuf, message: String },
}

fn display_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
