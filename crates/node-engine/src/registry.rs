//! Node type registry for dynamic node resolution
//!
//! This module provides a registry that maps node type strings to executors
//! and metadata. Nodes come from two places: static built-ins collected at
//! link time through `inventory`, and nodes synthesized at startup from a
//! configuration table.
//!
//! # Usage
//!
//! ```ignore
//! use node_engine::NodeRegistry;
//!
//! let mut registry = NodeRegistry::with_builtins();
//! registry.register(metadata, Arc::new(MyExecutor));
//!
//! let outputs = registry.execute("MyNode", "my-node-1", inputs).await?;
//! ```

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;

use crate::descriptor::{DescriptorFn, TaskMetadata};
use crate::error::{NodeEngineError, Result};
use crate::inputs::{NodeInputs, NodeOutputs};

/// Per-node-type executor
///
/// A `NodeExecutor` handles exactly one node type. It receives the named
/// inputs (already completed with declared defaults) and returns one value
/// per declared output.
#[async_trait]
pub trait NodeExecutor: Send + Sync {
    /// Execute this node type with the given inputs
    async fn execute(&self, task_id: &str, inputs: NodeInputs) -> Result<NodeOutputs>;
}

/// Link-time registration of a static executor.
///
/// Pairs with `DescriptorFn`: the `executor` field is a function pointer
/// that creates the executor for `node_type` at runtime.
///
/// ```ignore
/// inventory::submit!(node_engine::ExecutorFn {
///     node_type: "SimpleTextCombinerNode",
///     executor: || Arc::new(SimpleTextCombinerExecutor),
/// });
/// ```
pub struct ExecutorFn {
    /// The node type this executor belongs to.
    pub node_type: &'static str,
    /// Factory function that creates the executor instance.
    pub executor: fn() -> Arc<dyn NodeExecutor>,
}

inventory::collect!(ExecutorFn);

/// A registration entry combining metadata with an optional executor
struct RegistryEntry {
    metadata: TaskMetadata,
    executor: Option<Arc<dyn NodeExecutor>>,
}

/// Registry of node types with their metadata and executors
///
/// Registering a node type that already exists replaces the previous
/// entry; the replaced metadata is handed back so callers can report it.
pub struct NodeRegistry {
    entries: HashMap<String, RegistryEntry>,
}

impl NodeRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Create a registry holding every statically collected built-in node
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        for descriptor in inventory::iter::<DescriptorFn> {
            registry.register_metadata((descriptor.0)());
        }
        for factory in inventory::iter::<ExecutorFn> {
            match registry.entries.get_mut(factory.node_type) {
                Some(entry) => entry.executor = Some((factory.executor)()),
                None => log::warn!(
                    "Executor submitted for '{}' without a descriptor; ignoring",
                    factory.node_type
                ),
            }
        }
        registry
    }

    /// Register a node type with metadata and an executor
    ///
    /// Returns the metadata of the entry that was replaced, if any.
    pub fn register(
        &mut self,
        metadata: TaskMetadata,
        executor: Arc<dyn NodeExecutor>,
    ) -> Option<TaskMetadata> {
        self.entries
            .insert(
                metadata.node_type.clone(),
                RegistryEntry {
                    metadata,
                    executor: Some(executor),
                },
            )
            .map(|old| old.metadata)
    }

    /// Register a node type with metadata only (no executor)
    pub fn register_metadata(&mut self, metadata: TaskMetadata) -> Option<TaskMetadata> {
        self.entries
            .insert(
                metadata.node_type.clone(),
                RegistryEntry {
                    metadata,
                    executor: None,
                },
            )
            .map(|old| old.metadata)
    }

    /// Get metadata for a node type
    pub fn get_metadata(&self, node_type: &str) -> Option<&TaskMetadata> {
        self.entries.get(node_type).map(|e| &e.metadata)
    }

    /// Node type to display label, the map hosts show in their node menu
    pub fn display_names(&self) -> HashMap<&str, &str> {
        self.entries
            .iter()
            .map(|(node_type, e)| (node_type.as_str(), e.metadata.label.as_str()))
            .collect()
    }

    /// Get the executor for a node type
    pub fn get_executor(&self, node_type: &str) -> Option<Arc<dyn NodeExecutor>> {
        self.entries
            .get(node_type)
            .and_then(|e| e.executor.clone())
    }

    /// Check if a node type is registered
    pub fn has_node_type(&self, node_type: &str) -> bool {
        self.entries.contains_key(node_type)
    }

    /// Number of registered node types
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the registry is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Execute a node by type, following the host calling convention
    ///
    /// Inputs the host omitted are filled from the declared defaults. A
    /// required input with neither a value nor a default is an error.
    pub async fn execute(
        &self,
        node_type: &str,
        task_id: &str,
        inputs: NodeInputs,
    ) -> Result<NodeOutputs> {
        let entry = self
            .entries
            .get(node_type)
            .ok_or_else(|| NodeEngineError::UnknownNodeType(node_type.to_string()))?;
        let executor = entry.executor.as_ref().ok_or_else(|| {
            NodeEngineError::failed(format!(
                "No executor registered for node type '{}' (task_id: '{}')",
                node_type, task_id
            ))
        })?;

        let inputs = resolve_inputs(&entry.metadata, inputs)?;
        log::debug!("Executing {} as {}", node_type, task_id);
        let outputs = executor.execute(task_id, inputs).await?;

        for port in &entry.metadata.outputs {
            if !outputs.contains_key(&port.id) {
                return Err(NodeEngineError::failed(format!(
                    "Node '{}' did not produce declared output '{}'",
                    node_type, port.id
                )));
            }
        }
        Ok(outputs)
    }
}

impl Default for NodeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Complete `inputs` with the declared defaults of `metadata`
///
/// Integers on bounded ports are clamped into the port bounds, the same
/// range the host widget allows. Negative integers below a lower bound
/// become that bound.
pub fn resolve_inputs(metadata: &TaskMetadata, mut inputs: NodeInputs) -> Result<NodeInputs> {
    for port in &metadata.inputs {
        if let Some(value) = inputs.get_mut(&port.id).filter(|v| !v.is_null()) {
            if let Some(n) = value.as_u64() {
                *value = serde_json::Value::from(port.options.clamp(n));
            } else if let (Some(_), Some(min)) = (value.as_i64(), port.options.min) {
                *value = serde_json::Value::from(min);
            }
            continue;
        }
        match port.default_value() {
            Some(default) => {
                inputs.insert(port.id.clone(), default.clone());
            }
            None if port.required => {
                return Err(NodeEngineError::MissingInput(port.id.clone()));
            }
            None => {}
        }
    }
    Ok(inputs)
}

/// Synchronous callback-based NodeExecutor
///
/// Wraps a synchronous closure so pure node functions can be registered
/// without writing an executor type.
pub struct SyncCallbackNodeExecutor {
    callback: Box<dyn Fn(&str, NodeInputs) -> Result<NodeOutputs> + Send + Sync>,
}

impl SyncCallbackNodeExecutor {
    pub fn new(
        callback: impl Fn(&str, NodeInputs) -> Result<NodeOutputs> + Send + Sync + 'static,
    ) -> Self {
        Self {
            callback: Box::new(callback),
        }
    }
}

#[async_trait]
impl NodeExecutor for SyncCallbackNodeExecutor {
    async fn execute(&self, task_id: &str, inputs: NodeInputs) -> Result<NodeOutputs> {
        (self.callback)(task_id, inputs)
    }
}
