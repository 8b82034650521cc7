//! Typed access to named node inputs
//!
//! Hosts hand executors a map of JSON values keyed by port id. These helpers
//! pull out a typed value and report a descriptive error when the host sent
//! the wrong JSON type.

use std::collections::HashMap;

use crate::error::{NodeEngineError, Result};
use crate::types::PortDataType;

/// Named values passed into a node
pub type NodeInputs = HashMap<String, serde_json::Value>;

/// Named values returned from a node
pub type NodeOutputs = HashMap<String, serde_json::Value>;

/// Read a string input. Absent or `null` inputs are `None`.
pub fn optional_string(inputs: &NodeInputs, port: &str) -> Result<Option<String>> {
    match inputs.get(port) {
        None | Some(serde_json::Value::Null) => Ok(None),
        Some(serde_json::Value::String(s)) => Ok(Some(s.clone())),
        Some(_) => Err(NodeEngineError::invalid_input(port, PortDataType::String.as_str())),
    }
}

/// Read a required string input
pub fn string(inputs: &NodeInputs, port: &str) -> Result<String> {
    optional_string(inputs, port)?.ok_or_else(|| NodeEngineError::MissingInput(port.to_string()))
}

/// Read a required boolean input
pub fn boolean(inputs: &NodeInputs, port: &str) -> Result<bool> {
    match inputs.get(port) {
        None | Some(serde_json::Value::Null) => Err(NodeEngineError::MissingInput(port.to_string())),
        Some(value) => value
            .as_bool()
            .ok_or_else(|| NodeEngineError::invalid_input(port, PortDataType::Boolean.as_str())),
    }
}

/// Read a required non-negative integer input
pub fn unsigned(inputs: &NodeInputs, port: &str) -> Result<u64> {
    match inputs.get(port) {
        None | Some(serde_json::Value::Null) => Err(NodeEngineError::MissingInput(port.to_string())),
        Some(value) => value
            .as_u64()
            .ok_or_else(|| NodeEngineError::invalid_input(port, "non-negative integer")),
    }
}

/// Build a single-output result map
pub fn single_output(port: &str, value: impl Into<serde_json::Value>) -> NodeOutputs {
    let mut outputs = NodeOutputs::new();
    outputs.insert(port.to_string(), value.into());
    outputs
}
