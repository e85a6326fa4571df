//! `PipelineExecutor`: walks the stage order for one generation request.
//!
//! The walk is a loop over the transition rule. After every stage the next
//! stage is chosen from the idea's *current* doc selection, so a
//! [`StageListener`] that edits the selection changes what runs next.

use std::path::PathBuf;
use std::sync::Arc;

use chrono::Utc;
use indexmap::IndexMap;
use pipeline::{
    next_stage, ArtifactWriter, DocGenError, DocSelection, GenerationResult, GenerationRunId,
    Idea, StageId, StageReport, TemplateRenderer,
};
use tracing::{debug, info, info_span, warn};

use crate::correction::CorrectionPass;
use crate::stages::{default_stages, Stage, StageContext};

/// What to generate and how to persist it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationRequest {
    pub docs: DocSelection,
    pub overwrite: bool,
    /// Replaces the idea's own output directory when set.
    pub output_dir: Option<PathBuf>,
    /// Run the correction pass after the last stage.
    pub correct: bool,
}

impl GenerationRequest {
    pub fn new(docs: DocSelection) -> Self {
        Self {
            docs,
            ..Self::default()
        }
    }

    /// Every type in the vocabulary.
    pub fn all() -> Self {
        Self::new(DocSelection::all())
    }

    pub fn overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    pub fn output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = Some(dir.into());
        self
    }

    pub fn correct(mut self, correct: bool) -> Self {
        self.correct = correct;
        self
    }
}

/// Observes the walk between stages.
///
/// `stage_completed` runs after every executed stage, before the next stage is
/// chosen. Tags inserted into or removed from `docs` are honoured for the
/// stages that have not run yet.
pub trait StageListener {
    fn stage_completed(&mut self, report: &StageReport, docs: &mut DocSelection);
}

/// Listener that does nothing.
impl StageListener for () {
    fn stage_completed(&mut self, _report: &StageReport, _docs: &mut DocSelection) {}
}

/// Drives the stage walk for generation requests.
pub struct PipelineExecutor {
    renderer: Arc<dyn TemplateRenderer>,
    writer: Arc<dyn ArtifactWriter>,
    stages: Vec<Box<dyn Stage>>,
}

impl PipelineExecutor {
    /// Creates an executor with the default stage set.
    pub fn new(renderer: Arc<dyn TemplateRenderer>, writer: Arc<dyn ArtifactWriter>) -> Self {
        Self {
            renderer,
            writer,
            stages: default_stages(),
        }
    }

    /// Replaces the stage implementation registered for `stage.id()`.
    pub fn with_stage(mut self, stage: Box<dyn Stage>) -> Self {
        let id = stage.id();
        match self.stages.iter_mut().find(|s| s.id() == id) {
            Some(slot) => *slot = stage,
            None => self.stages.push(stage),
        }
        self
    }

    /// Runs one generation request.
    pub fn run(&self, idea: Idea, request: &GenerationRequest) -> Result<GenerationResult, DocGenError> {
        self.run_with_listener(idea, request, &mut ())
    }

    /// Generates every type in the vocabulary.
    pub fn generate_all(&self, idea: Idea, overwrite: bool) -> Result<GenerationResult, DocGenError> {
        self.run(idea, &GenerationRequest::all().overwrite(overwrite))
    }

    /// Runs one generation request, calling `listener` after every stage.
    ///
    /// Validation happens before any stage runs. A render or write failure
    /// aborts the walk; files written by earlier stages stay on disk.
    pub fn run_with_listener(
        &self,
        mut idea: Idea,
        request: &GenerationRequest,
        listener: &mut dyn StageListener,
    ) -> Result<GenerationResult, DocGenError> {
        idea.validate()?;

        idea.docs = request.docs.clone();
        idea.overwrite = request.overwrite;
        if let Some(dir) = &request.output_dir {
            idea.output_dir = dir.clone();
        }

        let run_id = GenerationRunId::new_random();
        let span = info_span!("generation", run_id = %run_id, title = %idea.title);
        let _guard = span.enter();

        for tag in idea.docs.unknown() {
            warn!(doc_type = tag, "Requested type has no stage; ignoring");
        }
        info!(
            requested = ?idea.docs.tags(),
            output_dir = %idea.output_dir.display(),
            overwrite = idea.overwrite,
            "Generation started"
        );

        let mut reports: IndexMap<String, StageReport> = IndexMap::new();
        let mut current: Option<StageId> = None;
        while let Some(id) = next_stage(current, &idea.docs) {
            log_skipped(current, id);
            let stage = self.stage(id)?;
            let report = info_span!("stage", stage = id.key()).in_scope(|| {
                stage.run(
                    &idea,
                    StageContext {
                        renderer: self.renderer.as_ref(),
                        writer: self.writer.as_ref(),
                    },
                )
            })?;
            debug!(stage = id.key(), artifacts = report.artifacts.len(), "Stage complete");

            listener.stage_completed(&report, &mut idea.docs);
            reports.insert(id.key().to_string(), report);
            current = Some(id);
        }

        let mut result = GenerationResult {
            run_id,
            idea_hash: idea.fingerprint(),
            generated_at: Utc::now(),
            output_dir: idea.output_dir.clone(),
            requested: request.docs.clone(),
            stages: reports,
            corrections: None,
        };

        if request.correct {
            let log = CorrectionPass::new(self.writer.clone()).run(&idea, &result);
            result.corrections = Some(log);
        }

        info!(
            stages = result.stages.len(),
            artifacts = result.artifacts().count(),
            "Generation finished"
        );
        Ok(result)
    }

    fn stage(&self, id: StageId) -> Result<&dyn Stage, DocGenError> {
        self.stages
            .iter()
            .find(|s| s.id() == id)
            .map(|s| s.as_ref())
            .ok_or_else(|| DocGenError::Render {
                template: String::new(),
                message: format!("no stage registered for {id}"),
            })
    }
}

fn log_skipped(after: Option<StageId>, next: StageId) {
    let start = after
        .and_then(|a| StageId::ORDER.iter().position(|s| *s == a))
        .map_or(0, |p| p + 1);
    for skipped in StageId::ORDER[start..].iter().take_while(|s| **s != next) {
        debug!(stage = skipped.key(), "Stage not requested; skipping");
    }
}
