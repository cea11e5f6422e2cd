// Schema Validation Port
//
// The validator is consumed opaquely: values are forwarded through `parse`
// and the schema itself is never inspected.

use serde_json::Value;
use std::sync::Arc;
use thiserror::Error;

/// Opaque `parse`-style validation contract
pub trait SchemaValidator: Send + Sync {
    /// Validate `value`, returning the (possibly normalized) parsed value
    fn parse(&self, value: &Value) -> Result<Value, SchemaError>;
}

pub type SchemaRef = Arc<dyn SchemaValidator>;

/// Failure reported by a schema validator
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct SchemaError {
    pub message: String,
}

impl SchemaError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
