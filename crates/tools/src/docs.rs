//! The document-generation surface.
//!
//! | Tool | Arguments | Output |
//! |------|-----------|--------|
//! | `ping` | none | `"pong"` |
//! | `list_tools` | none | the names below |
//! | `generate_documents` | `idea_json`, `docs`, `overwrite?`, `correct?` | envelope of the generation result |
//! | `generate_all` | `idea_json`, `overwrite?`, `correct?` | envelope of the generation result |
//! | `list_outputs` | none | relative paths under the output directory |
//! | `show_doc` | `path` | document text, or a not-found message |
//! | `zip_outputs` | none | path of the written archive |

use pipeline::{DocSelection, Idea};
use serde::Deserialize;
use serde_json::Value;
use tracing::warn;

use nodes::GenerationRequest;

use crate::envelope::Envelope;
use crate::errors::ToolError;
use crate::registry::ToolRegistry;
use crate::surface::{decode_args, encode, register_common, SurfaceContext};

/// Tools exposed by the docs surface, in advertised order.
pub const DOCS_TOOLS: [&str; 7] = [
    "ping",
    "list_tools",
    "generate_documents",
    "generate_all",
    "list_outputs",
    "show_doc",
    "zip_outputs",
];

#[derive(Debug, Deserialize)]
struct GenerateDocumentsArgs {
    idea_json: String,
    docs: Vec<String>,
    #[serde(default)]
    overwrite: bool,
    #[serde(default)]
    correct: bool,
}

#[derive(Debug, Deserialize)]
struct GenerateAllArgs {
    idea_json: String,
    #[serde(default)]
    overwrite: bool,
    #[serde(default)]
    correct: bool,
}

#[derive(Debug, Deserialize)]
struct ShowDocArgs {
    path: String,
}

/// Builds and validates the docs surface.
pub fn docs_registry(ctx: SurfaceContext) -> Result<ToolRegistry, ToolError> {
    let mut registry = ToolRegistry::new();
    register_common(&mut registry, &DOCS_TOOLS)?;

    let c = ctx.clone();
    registry.register("generate_documents", move |args| {
        let args: GenerateDocumentsArgs = decode_args("generate_documents", args)?;
        let request = GenerationRequest::new(DocSelection::new(&args.docs))
            .overwrite(args.overwrite)
            .correct(args.correct)
            .output_dir(&c.output_dir);
        Ok(generate(&c, &args.idea_json, &request, "generate_documents"))
    })?;

    let c = ctx.clone();
    registry.register("generate_all", move |args| {
        let args: GenerateAllArgs = decode_args("generate_all", args)?;
        let request = GenerationRequest::all()
            .overwrite(args.overwrite)
            .correct(args.correct)
            .output_dir(&c.output_dir);
        Ok(generate(&c, &args.idea_json, &request, "generate_all"))
    })?;

    let c = ctx.clone();
    registry.register("list_outputs", move |_| {
        let files = artifacts::list_outputs(&c.output_dir).unwrap_or_else(|e| {
            warn!(dir = %c.output_dir.display(), error = %e, "Cannot list outputs");
            Vec::new()
        });
        encode("list_outputs", files)
    })?;

    let c = ctx.clone();
    registry.register("show_doc", move |args| {
        let args: ShowDocArgs = decode_args("show_doc", args)?;
        let text = match artifacts::read_document(&c.output_dir, &args.path) {
            Ok(Some(text)) => text,
            Ok(None) => format!("Document not found: {}", args.path),
            Err(e) => format!("Error reading document: {e}"),
        };
        Ok(Value::String(text))
    })?;

    let c = ctx;
    registry.register("zip_outputs", move |_| {
        let message = match artifacts::package_outputs(&c.output_dir, &c.archive) {
            Ok(path) => path.display().to_string(),
            Err(e) => {
                warn!(error = %e, "Packaging failed");
                format!("Error creating zip: {e}")
            }
        };
        Ok(Value::String(message))
    })?;

    registry.validate(&DOCS_TOOLS)?;
    Ok(registry)
}

fn generate(ctx: &SurfaceContext, idea_json: &str, request: &GenerationRequest, tool: &str) -> Value {
    let outcome = Idea::from_json(idea_json).and_then(|idea| ctx.executor.run(idea, request));
    if let Err(e) = &outcome {
        warn!(tool, error = %e, "Generation failed");
    }
    Envelope::from_result(outcome).into_value()
}
