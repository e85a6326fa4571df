//! Profile-driven generation.

use pipeline::{resolve_profile, DocGenError, Idea, ProfileRun};
use tracing::info;

use crate::executor::{GenerationRequest, PipelineExecutor};

impl PipelineExecutor {
    /// Resolves `profile` and runs the pipeline over its types.
    ///
    /// `request.docs` is replaced by the profile's selection. An unknown
    /// profile fails before validation or any stage.
    pub fn orchestrate(
        &self,
        idea: Idea,
        profile: &str,
        request: GenerationRequest,
    ) -> Result<ProfileRun, DocGenError> {
        let resolved = resolve_profile(profile)?;
        info!(profile = resolved.name, documents = resolved.docs.len(), "Profile resolved");

        let request = GenerationRequest {
            docs: resolved.selection(),
            ..request
        };
        let result = self.run(idea, &request)?;
        Ok(ProfileRun {
            profile: resolved.name.to_string(),
            documents: resolved.docs.iter().map(|d| d.to_string()).collect(),
            result,
        })
    }
}
