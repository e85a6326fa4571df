//! DocGen filesystem adapter.
//!
//! Implements the [`pipeline::ArtifactWriter`] port on the local filesystem and
//! provides the output-directory helpers used by the tool surfaces.
//!
//! ## Architectural Layer
//!
//! **Infrastructure.** Directory creation, the `.new` collision redirect,
//! write probing, and archive encoding all live here. The [`pipeline`] crate
//! sees only [`pipeline::ArtifactWriter`].

pub mod archive;
pub mod discovery;
pub mod outputs;
pub mod writer;

pub use archive::package_outputs;
pub use discovery::{default_candidates, discover_output_dir};
pub use outputs::{list_outputs, read_document, resolve_inside};
pub use writer::{collision_path, FsArtifactWriter, COLLISION_SUFFIX};
