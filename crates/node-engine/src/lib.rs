//! Node Engine - node contract shared by hosts and node crates
//!
//! This crate defines how a node describes itself and how a host invokes it:
//!
//! - `TaskMetadata` / `PortMetadata` / `PortOptions`: declared input schema
//!   (types, defaults, dropdown choices, bounds) and declared outputs
//! - `NodeExecutor`: named inputs in, one value per declared output out
//! - `NodeRegistry`: node type name to metadata and executor, with static
//!   built-ins collected at link time through `inventory`
//! - `ExecutorTask` / `ContextKeys`: run a registered node as a graph-flow
//!   task, reading inputs from and writing outputs to the shared context
//!
//! # Example
//!
//! ```ignore
//! use node_engine::NodeRegistry;
//!
//! let registry = NodeRegistry::with_builtins();
//! let outputs = registry.execute("SimpleTextCombinerNode", "combine-1", inputs).await?;
//! ```

pub mod context;
pub mod descriptor;
pub mod error;
pub mod inputs;
pub mod port_options;
pub mod registry;
pub mod task;
pub mod types;

// Re-export key types
pub use context::ContextKeys;
pub use descriptor::{DescriptorFn, PortMetadata, TaskDescriptor, TaskMetadata};
pub use error::{NodeEngineError, Result};
pub use inputs::{NodeInputs, NodeOutputs};
pub use port_options::PortOptions;
pub use registry::{
    resolve_inputs, ExecutorFn, NodeExecutor, NodeRegistry, SyncCallbackNodeExecutor,
};
pub use task::ExecutorTask;
pub use types::{NodeCategory, PortDataType};

// Re-export graph-flow types that node crates will need
pub use graph_flow::{Context, NextAction, Task, TaskResult};
