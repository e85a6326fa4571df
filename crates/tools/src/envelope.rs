//! The uniform success/error envelope returned by generating tools.

use std::fmt::Display;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// `{"success": true, "result": ...}` or `{"success": false, "error": "..."}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Envelope {
    pub fn ok(result: Value) -> Self {
        Self {
            success: true,
            result: Some(result),
            error: None,
        }
    }

    pub fn failure(error: impl Display) -> Self {
        Self {
            success: false,
            result: None,
            error: Some(error.to_string()),
        }
    }

    /// Wraps any fallible outcome. Encoding failures of the success value
    /// become failure envelopes.
    pub fn from_result<T: Serialize, E: Display>(outcome: Result<T, E>) -> Self {
        match outcome {
            Ok(value) => match serde_json::to_value(value) {
                Ok(value) => Self::ok(value),
                Err(e) => Self::failure(e),
            },
            Err(e) => Self::failure(e),
        }
    }

    pub fn into_value(self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}
