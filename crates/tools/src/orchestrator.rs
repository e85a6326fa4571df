//! The profile-orchestration surface: `ping`, `list_tools`, and
//! `orchestrate_docgen` (`idea_json`, `profile` defaulting to `"full"`,
//! `overwrite?`, `correct?`).

use nodes::GenerationRequest;
use pipeline::Idea;
use serde::Deserialize;
use tracing::warn;

use crate::envelope::Envelope;
use crate::errors::ToolError;
use crate::registry::ToolRegistry;
use crate::surface::{decode_args, register_common, SurfaceContext};

/// Tools exposed by the orchestrator surface, in advertised order.
pub const ORCHESTRATOR_TOOLS: [&str; 3] = ["ping", "list_tools", "orchestrate_docgen"];

fn default_profile() -> String {
    "full".to_string()
}

#[derive(Debug, Deserialize)]
struct OrchestrateArgs {
    idea_json: String,
    #[serde(default = "default_profile")]
    profile: String,
    #[serde(default)]
    overwrite: bool,
    #[serde(default)]
    correct: bool,
}

/// Builds and validates the orchestrator surface.
pub fn orchestrator_registry(ctx: SurfaceContext) -> Result<ToolRegistry, ToolError> {
    let mut registry = ToolRegistry::new();
    register_common(&mut registry, &ORCHESTRATOR_TOOLS)?;

    registry.register("orchestrate_docgen", move |args| {
        let args: OrchestrateArgs = decode_args("orchestrate_docgen", args)?;
        let request = GenerationRequest::default()
            .overwrite(args.overwrite)
            .correct(args.correct)
            .output_dir(&ctx.output_dir);
        let outcome = Idea::from_json(&args.idea_json)
            .and_then(|idea| ctx.executor.orchestrate(idea, &args.profile, request));
        if let Err(e) = &outcome {
            warn!(profile = %args.profile, error = %e, "Orchestration failed");
        }
        Ok(Envelope::from_result(outcome).into_value())
    })?;

    registry.validate(&ORCHESTRATOR_TOOLS)?;
    Ok(registry)
}
