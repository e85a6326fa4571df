//! `CorrectionPass`: applies the correction rules to generated artifacts and
//! persists the results.
//!
//! Persistence goes through the same [`ArtifactWriter`] and `overwrite` flag
//! as generation, so a non-overwrite request never loses the generated text:
//! the corrected version lands beside it as a `.new` file. Persistence
//! failures are logged and recorded, never raised.

use std::sync::Arc;

use pipeline::{correct, ArtifactWriter, CorrectionLog, CorrectionRecord, GenerationResult, Idea};
use tracing::{debug, info, info_span, warn};

/// File name of the persisted changelog.
pub const CHANGELOG_FILE: &str = "corrections.json";

/// Post-generation correction over the artifacts of one result.
pub struct CorrectionPass {
    writer: Arc<dyn ArtifactWriter>,
}

impl CorrectionPass {
    pub fn new(writer: Arc<dyn ArtifactWriter>) -> Self {
        Self { writer }
    }

    /// Corrects every artifact in `result`, in pipeline order.
    ///
    /// `idea` must be the stamped idea the result was generated from; its
    /// output directory and `overwrite` flag decide where corrections land.
    pub fn run(&self, idea: &Idea, result: &GenerationResult) -> CorrectionLog {
        let span = info_span!("correction", run_id = %result.run_id);
        let _guard = span.enter();

        let mut records = Vec::new();
        for artifact in result.artifacts() {
            let text = match self.writer.read(&artifact.path) {
                Ok(text) => text,
                Err(e) => {
                    warn!(path = %artifact.path.display(), error = %e, "Cannot read artifact for correction; skipping");
                    records.push(CorrectionRecord::Unreadable {
                        doc_type: artifact.doc_type,
                        error: e.to_string(),
                    });
                    continue;
                }
            };

            let mut correction = correct(artifact.doc_type, &text);
            if let CorrectionRecord::Corrected { persisted_to, .. } = &mut correction.record {
                let destination = idea.output_dir.join(artifact.doc_type.file_name());
                match self.writer.write(&destination, &correction.text, idea.overwrite) {
                    Ok(path) => {
                        info!(doc_type = %artifact.doc_type, path = %path.display(), "Correction persisted");
                        *persisted_to = Some(path);
                    }
                    Err(e) => {
                        warn!(doc_type = %artifact.doc_type, error = %e, "Failed to persist correction");
                    }
                }
            } else {
                debug!(doc_type = %artifact.doc_type, "No correction needed");
            }
            records.push(correction.record);
        }

        let changelog_path = self.persist_changelog(idea, &records);
        CorrectionLog {
            records,
            changelog_path,
        }
    }

    fn persist_changelog(&self, idea: &Idea, records: &[CorrectionRecord]) -> Option<std::path::PathBuf> {
        let json = match serde_json::to_string_pretty(records) {
            Ok(json) => json,
            Err(e) => {
                warn!(error = %e, "Failed to encode correction changelog");
                return None;
            }
        };
        let destination = idea.output_dir.join(CHANGELOG_FILE);
        match self.writer.write(&destination, &json, idea.overwrite) {
            Ok(path) => Some(path),
            Err(e) => {
                warn!(path = %destination.display(), error = %e, "Failed to persist correction changelog");
                None
            }
        }
    }
}
