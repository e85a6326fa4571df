//! DocGen stage implementations and pipeline executor.
//!
//! This crate provides the ten default stages (BRD/PRD through Release
//! Runbook), the askama renderer behind the [`pipeline::TemplateRenderer`]
//! port, the [`PipelineExecutor`] that walks the stage order, and the
//! [`CorrectionPass`] that persists corrected artifacts.
//!
//! ## Architectural Layer
//!
//! **Orchestration layer.** Stages sequence calls between the domain rules in
//! the [`pipeline`] crate and the infrastructure ports (renderer, writer).
//! They contain no domain rules of their own.

pub mod correction;
pub mod executor;
pub mod orchestrate;
pub mod stages;
pub mod templates;

pub use correction::{CorrectionPass, CHANGELOG_FILE};
pub use executor::{GenerationRequest, PipelineExecutor, StageListener};
pub use stages::{default_stages, emit, DataModelStage, DocumentStage, Stage, StageContext};
pub use templates::AskamaRenderer;
