//! Core types shared by node descriptors
//!
//! These types describe what flows through a port and how nodes are
//! grouped when a host lists them.

use serde::{Deserialize, Serialize};

/// The data type of a port
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PortDataType {
    /// Text string
    String,
    /// Prompt text (a string that is fed to the image model)
    Prompt,
    /// Boolean value
    Boolean,
    /// Integer value
    Number,
    /// One value out of a fixed list of strings
    Choice,
}

impl PortDataType {
    /// Name used in error messages
    pub fn as_str(&self) -> &'static str {
        match self {
            PortDataType::String => "string",
            PortDataType::Prompt => "prompt",
            PortDataType::Boolean => "boolean",
            PortDataType::Number => "number",
            PortDataType::Choice => "choice",
        }
    }
}

/// Category of a node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeCategory {
    /// Nodes that let the user pick a value
    Input,
    /// Nodes that generate tags
    Generator,
    /// Nodes that fold several inputs into one prompt
    Combiner,
}
