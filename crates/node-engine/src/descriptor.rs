//! Task descriptor trait and metadata types
//!
//! This module provides the `TaskDescriptor` trait that allows statically
//! known tasks to self-describe their metadata (ports, category, label).
//!
//! Nodes synthesized at startup from configuration build a `TaskMetadata`
//! value directly instead; both kinds end up in the same `NodeRegistry`.

use serde::{Deserialize, Serialize};

use crate::port_options::PortOptions;
use crate::types::{NodeCategory, PortDataType};

/// Trait for tasks that can describe their metadata
///
/// # Example
///
/// ```ignore
/// use node_engine::{NodeCategory, PortDataType, PortMetadata, TaskDescriptor, TaskMetadata};
///
/// impl TaskDescriptor for MyTask {
///     fn descriptor() -> TaskMetadata {
///         TaskMetadata::new("MyTaskNode", NodeCategory::Combiner, "My Task")
///             .input(PortMetadata::required("text", "Text", PortDataType::String))
///             .output(PortMetadata::output("prompt", "Prompt", PortDataType::String))
///     }
/// }
/// ```
pub trait TaskDescriptor {
    /// Get the static metadata for this task type
    fn descriptor() -> TaskMetadata
    where
        Self: Sized;
}

/// Complete metadata for a task type
///
/// This describes everything needed to render a node in the UI
/// and to fill in defaults for inputs the host left out.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskMetadata {
    /// Unique type identifier (e.g., "BodyTypeNode")
    pub node_type: String,
    /// Category for UI grouping
    pub category: NodeCategory,
    /// Menu group shown by the host
    pub group: String,
    /// Human-readable label
    pub label: String,
    /// Description of what the task does
    pub description: String,
    /// Input port definitions, in declaration order
    pub inputs: Vec<PortMetadata>,
    /// Output port definitions, in result order
    pub outputs: Vec<PortMetadata>,
}

impl TaskMetadata {
    /// Create metadata with no ports
    pub fn new(
        node_type: impl Into<String>,
        category: NodeCategory,
        label: impl Into<String>,
    ) -> Self {
        Self {
            node_type: node_type.into(),
            category,
            group: String::new(),
            label: label.into(),
            description: String::new(),
            inputs: Vec::new(),
            outputs: Vec::new(),
        }
    }

    /// Set the menu group
    pub fn group(mut self, group: impl Into<String>) -> Self {
        self.group = group.into();
        self
    }

    /// Set the description
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Append an input port
    pub fn input(mut self, port: PortMetadata) -> Self {
        self.inputs.push(port);
        self
    }

    /// Append an output port
    pub fn output(mut self, port: PortMetadata) -> Self {
        self.outputs.push(port);
        self
    }

    /// Find an input port by id
    pub fn find_input(&self, id: &str) -> Option<&PortMetadata> {
        self.inputs.iter().find(|p| p.id == id)
    }
}

/// Metadata for a port (input or output)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortMetadata {
    /// Port identifier (used in context keys and host keyword arguments)
    pub id: String,
    /// Human-readable label
    pub label: String,
    /// Data type
    pub data_type: PortDataType,
    /// Whether this input is required
    pub required: bool,
    /// Widget options and default value
    #[serde(default)]
    pub options: PortOptions,
}

impl PortMetadata {
    /// Create a new port metadata
    pub fn new(
        id: impl Into<String>,
        label: impl Into<String>,
        data_type: PortDataType,
        required: bool,
    ) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            data_type,
            required,
            options: PortOptions::default(),
        }
    }

    /// Create a required port
    pub fn required(
        id: impl Into<String>,
        label: impl Into<String>,
        data_type: PortDataType,
    ) -> Self {
        Self::new(id, label, data_type, true)
    }

    /// Create an optional port
    pub fn optional(
        id: impl Into<String>,
        label: impl Into<String>,
        data_type: PortDataType,
    ) -> Self {
        Self::new(id, label, data_type, false)
    }

    /// Create an output port
    pub fn output(
        id: impl Into<String>,
        label: impl Into<String>,
        data_type: PortDataType,
    ) -> Self {
        Self::new(id, label, data_type, false)
    }

    /// Attach widget options
    pub fn with_options(mut self, options: PortOptions) -> Self {
        self.options = options;
        self
    }

    /// Default value, if any
    pub fn default_value(&self) -> Option<&serde_json::Value> {
        self.options.default.as_ref()
    }
}

/// Link-time registration of a static task descriptor.
///
/// ```ignore
/// inventory::submit!(node_engine::DescriptorFn(MyTask::descriptor));
/// ```
pub struct DescriptorFn(pub fn() -> TaskMetadata);

inventory::collect!(DescriptorFn);
