//! Error types for the node engine

use thiserror::Error;

/// Result type alias using NodeEngineError
pub type Result<T> = std::result::Result<T, NodeEngineError>;

/// Errors that can occur while describing or executing nodes
#[derive(Debug, Error)]
pub enum NodeEngineError {
    /// Missing required input
    #[error("Missing required input: {0}")]
    MissingInput(String),

    /// Invalid input type
    #[error("Invalid input type for '{port}': expected {expected}")]
    InvalidInputType { port: String, expected: String },

    /// No node registered under this type
    #[error("Unknown node type: {0}")]
    UnknownNodeType(String),

    /// Task execution failed
    #[error("Task execution failed: {0}")]
    ExecutionFailed(String),
}

impl NodeEngineError {
    /// Create an execution failed error with a message
    pub fn failed(msg: impl Into<String>) -> Self {
        Self::ExecutionFailed(msg.into())
    }

    /// Create an invalid input type error
    pub fn invalid_input(port: impl Into<String>, expected: impl Into<String>) -> Self {
        Self::InvalidInputType {
            port: port.into(),
            expected: expected.into(),
        }
    }
}
