//! Generation domain for DocGen.
//!
//! This crate contains every domain concept used to turn an [`Idea`] into a set
//! of documents: the artifact-type vocabulary, the fixed stage order and its
//! transition rule, the profile table, the correction rules, and the error
//! taxonomy. Infrastructure crates implement the port traits defined here; they
//! never add domain rules.
//!
//! ## Architectural Layer
//!
//! **Business logic + port definitions.** This crate has no I/O dependencies.
//! It defines *what* is needed; infrastructure crates define *how* to supply it.
//!
//! ## Module Layout
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`identifiers`] | Newtype identifiers (`GenerationRunId`, `TemplateId`, `ToolName`) |
//! | [`catalog`] | `DocType`, `StageId`, `DocSelection`, the transition rule |
//! | [`types`] | `Idea`, `Artifact`, `StageReport`, `GenerationResult` |
//! | [`profiles`] | The four named profiles and their resolver |
//! | [`correction`] | Review-notes rules and correction records |
//! | [`ports`] | `ArtifactWriter` and `TemplateRenderer` traits |
//! | [`errors`] | `DocGenError` |

pub mod catalog;
pub mod correction;
pub mod errors;
pub mod identifiers;
pub mod ports;
pub mod profiles;
pub mod types;

// Re-export everything at the crate root for ergonomic usage by downstream crates.
pub use catalog::{next_stage, ContentKind, DocSelection, DocType, StageId};
pub use correction::{
    correct, improvement_labels, review_notes, Correction, CorrectionLog, CorrectionRecord,
    GENERIC_IMPROVEMENTS,
};
pub use errors::DocGenError;
pub use identifiers::{GenerationRunId, TemplateId, ToolName};
pub use ports::{ArtifactWriter, TemplateRenderer};
pub use profiles::{profile_names, resolve_profile, Profile, PROFILES};
pub use types::{
    Artifact, GenerationResult, Idea, IdeaContext, ProfileRun, StageReport, DEFAULT_OUTPUT_DIR,
};
