//! What every tool surface shares: the generation context, argument decoding,
//! and the `ping` / `list_tools` pair.

use std::path::PathBuf;
use std::sync::Arc;

use nodes::PipelineExecutor;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};

use crate::errors::ToolError;
use crate::registry::ToolRegistry;

/// Archive written by `zip_outputs` when none is configured.
pub const DEFAULT_ARCHIVE: &str = "docs_outputs.zip";

/// Everything a surface's handlers operate on.
#[derive(Clone)]
pub struct SurfaceContext {
    pub executor: Arc<PipelineExecutor>,
    /// Directory every generated artifact lands in. Overrides the idea's own
    /// `output_dir`, so the listing tools see what the generating tools wrote.
    pub output_dir: PathBuf,
    /// Path `zip_outputs` writes to.
    pub archive: PathBuf,
}

impl SurfaceContext {
    pub fn new(executor: Arc<PipelineExecutor>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            executor,
            output_dir: output_dir.into(),
            archive: PathBuf::from(DEFAULT_ARCHIVE),
        }
    }

    pub fn with_archive(mut self, archive: impl Into<PathBuf>) -> Self {
        self.archive = archive.into();
        self
    }
}

/// Decodes a handler's arguments. A missing argument object counts as `{}`.
pub fn decode_args<T: DeserializeOwned>(tool: &str, arguments: Value) -> Result<T, ToolError> {
    let arguments = match arguments {
        Value::Null => json!({}),
        other => other,
    };
    serde_json::from_value(arguments).map_err(|e| ToolError::InvalidArguments {
        tool: tool.to_string(),
        message: e.to_string(),
    })
}

/// Encodes a handler's output.
pub fn encode<T: serde::Serialize>(tool: &str, output: T) -> Result<Value, ToolError> {
    serde_json::to_value(output).map_err(|e| ToolError::Encode {
        tool: tool.to_string(),
        message: e.to_string(),
    })
}

/// Registers `ping` and `list_tools`, the latter answering with `advertised`.
pub fn register_common(
    registry: &mut ToolRegistry,
    advertised: &'static [&'static str],
) -> Result<(), ToolError> {
    registry.register("ping", |_| Ok(Value::String("pong".to_string())))?;
    registry.register("list_tools", move |_| encode("list_tools", advertised))?;
    Ok(())
}
