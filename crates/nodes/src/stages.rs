//! The ten generation stages.
//!
//! Every stage renders its artifact types through the [`TemplateRenderer`]
//! port and persists them through the [`ArtifactWriter`] port into the idea's
//! output directory, honouring the idea's `overwrite` flag. Stages do not read
//! each other's output.

use pipeline::{
    Artifact, ArtifactWriter, DocGenError, DocType, Idea, StageId, StageReport, TemplateId,
    TemplateRenderer,
};
use tracing::debug;

/// Collaborators a stage needs to produce its artifacts.
#[derive(Clone, Copy)]
pub struct StageContext<'a> {
    pub renderer: &'a dyn TemplateRenderer,
    pub writer: &'a dyn ArtifactWriter,
}

/// One unit of generation work.
pub trait Stage: Send + Sync {
    /// Which stage this is. Determines its position in the walk.
    fn id(&self) -> StageId;

    /// Produces the stage's artifacts for `idea`.
    fn run(&self, idea: &Idea, ctx: StageContext<'_>) -> Result<StageReport, DocGenError>;
}

/// Renders `doc_type` for `idea` and writes it to its canonical file name.
pub fn emit(doc_type: DocType, idea: &Idea, ctx: StageContext<'_>) -> Result<Artifact, DocGenError> {
    let text = ctx.renderer.render(doc_type, idea)?;
    let destination = idea.output_dir.join(doc_type.file_name());
    let path = ctx.writer.write(&destination, &text, idea.overwrite)?;
    let template = TemplateId::new(doc_type.template_name()).ok_or_else(|| DocGenError::Render {
        template: String::new(),
        message: format!("no template registered for {doc_type}"),
    })?;
    Ok(Artifact {
        name: doc_type.display_name().to_string(),
        doc_type,
        path,
        kind: doc_type.content_kind(),
        template,
    })
}

// ---------------------------------------------------------------------------
// Single-document stages
// ---------------------------------------------------------------------------

/// A stage that emits exactly one document.
#[derive(Debug, Clone, Copy)]
pub struct DocumentStage {
    id: StageId,
    doc_type: DocType,
}

impl DocumentStage {
    /// Creates the stage for `doc_type`.
    ///
    /// Returns `None` for types that belong to a multi-artifact stage.
    pub fn new(doc_type: DocType) -> Option<Self> {
        let id = StageId::for_doc_type(doc_type);
        (id.outputs() == [doc_type]).then_some(Self { id, doc_type })
    }
}

impl Stage for DocumentStage {
    fn id(&self) -> StageId {
        self.id
    }

    fn run(&self, idea: &Idea, ctx: StageContext<'_>) -> Result<StageReport, DocGenError> {
        let artifact = emit(self.doc_type, idea, ctx)?;
        Ok(StageReport {
            stage: self.id,
            name: self.id.display_name().to_string(),
            artifacts: vec![artifact],
        })
    }
}

// ---------------------------------------------------------------------------
// Data model stage
// ---------------------------------------------------------------------------

/// The entity-relationship diagram and the API specification, generated as
/// one unit.
///
/// Runs when either half is requested and emits only the requested halves,
/// so the set of produced types always matches the request.
#[derive(Debug, Clone, Copy, Default)]
pub struct DataModelStage;

impl Stage for DataModelStage {
    fn id(&self) -> StageId {
        StageId::ErdApi
    }

    fn run(&self, idea: &Idea, ctx: StageContext<'_>) -> Result<StageReport, DocGenError> {
        let mut artifacts = Vec::with_capacity(2);
        for doc_type in StageId::ErdApi.outputs() {
            if idea.docs.contains(*doc_type) {
                artifacts.push(emit(*doc_type, idea, ctx)?);
            } else {
                debug!(doc_type = %doc_type, "Half of the data model unit not requested");
            }
        }
        Ok(StageReport {
            stage: StageId::ErdApi,
            name: StageId::ErdApi.display_name().to_string(),
            artifacts,
        })
    }
}

/// The full stage set, one per [`StageId`], in execution order.
pub fn default_stages() -> Vec<Box<dyn Stage>> {
    StageId::ORDER
        .iter()
        .map(|id| -> Box<dyn Stage> {
            match id.outputs() {
                [single] => match DocumentStage::new(*single) {
                    Some(stage) => Box::new(stage),
                    None => Box::new(DataModelStage),
                },
                _ => Box::new(DataModelStage),
            }
        })
        .collect()
}
