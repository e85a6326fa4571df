//! Errors raised by the tool layer itself.
//!
//! Failures of the generation domain never appear here: handlers wrap them in
//! a `{success: false, error}` envelope. [`ToolError`] covers registry
//! mistakes and calls the registry cannot dispatch.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ToolError {
    /// A second handler was registered under an existing name.
    #[error("Tool '{name}' is already registered")]
    DuplicateTool { name: String },

    /// The call named a tool the surface does not expose.
    #[error("Unknown tool: {name}")]
    UnknownTool { name: String },

    /// Tool names must be non-empty.
    #[error("Tool name must not be empty")]
    EmptyName,

    /// The registered handlers do not match the advertised tool list.
    #[error("Registered tools {registered:?} do not match advertised tools {advertised:?}")]
    SurfaceMismatch {
        registered: Vec<String>,
        advertised: Vec<String>,
    },

    /// The arguments could not be decoded for the named tool.
    #[error("Invalid arguments for '{tool}': {message}")]
    InvalidArguments { tool: String, message: String },

    /// A handler's output could not be encoded.
    #[error("Failed to encode output of '{tool}': {message}")]
    Encode { tool: String, message: String },
}
