//! Named-operation registry.
//!
//! A surface is built by registering one handler per tool name and then
//! validating the registry against the tool list the surface advertises, so
//! `list_tools` can never drift from what is actually callable.

use indexmap::IndexMap;
use pipeline::ToolName;
use serde_json::Value;
use tracing::debug;

use crate::errors::ToolError;

/// A tool implementation: JSON arguments in, JSON output out.
pub type Handler = Box<dyn Fn(Value) -> Result<Value, ToolError> + Send + Sync>;

/// Tool handlers keyed by name, in registration order.
#[derive(Default)]
pub struct ToolRegistry {
    tools: IndexMap<ToolName, Handler>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a handler. Fails on an empty or already registered name.
    pub fn register<F>(&mut self, name: &str, handler: F) -> Result<(), ToolError>
    where
        F: Fn(Value) -> Result<Value, ToolError> + Send + Sync + 'static,
    {
        let key = ToolName::new(name).ok_or(ToolError::EmptyName)?;
        if self.tools.contains_key(&key) {
            return Err(ToolError::DuplicateTool {
                name: name.to_string(),
            });
        }
        debug!(tool = name, "Tool registered");
        self.tools.insert(key, Box::new(handler));
        Ok(())
    }

    /// Checks that the registered names are exactly `advertised`, in order.
    pub fn validate(&self, advertised: &[&str]) -> Result<(), ToolError> {
        let registered = self.names();
        if registered.iter().map(String::as_str).eq(advertised.iter().copied()) {
            Ok(())
        } else {
            Err(ToolError::SurfaceMismatch {
                registered,
                advertised: advertised.iter().map(|s| s.to_string()).collect(),
            })
        }
    }

    /// Registered names, in registration order.
    pub fn names(&self) -> Vec<String> {
        self.tools.keys().map(|k| k.to_string()).collect()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.tools.keys().any(|k| k.as_str() == name)
    }

    /// Invokes the handler registered under `name`.
    pub fn call(&self, name: &str, arguments: Value) -> Result<Value, ToolError> {
        let handler = self
            .tools
            .iter()
            .find(|(k, _)| k.as_str() == name)
            .map(|(_, h)| h)
            .ok_or_else(|| ToolError::UnknownTool {
                name: name.to_string(),
            })?;
        handler(arguments)
    }
}
