//! graph-flow adapter for registered nodes
//!
//! `ExecutorTask` runs any registered `NodeExecutor` as a graph-flow `Task`.
//! Inputs are read from the shared `Context` under `{task_id}.input.{port}`
//! for every declared input port, missing ones are filled from the declared
//! defaults, and every declared output is written back under
//! `{task_id}.output.{port}`.

use std::sync::Arc;

use async_trait::async_trait;
use graph_flow::{Context, GraphError, NextAction, Task, TaskResult};

use crate::context::ContextKeys;
use crate::descriptor::TaskMetadata;
use crate::error::{NodeEngineError, Result};
use crate::inputs::NodeInputs;
use crate::registry::{resolve_inputs, NodeExecutor, NodeRegistry};

/// A registered node bound to one task id
#[derive(Clone)]
pub struct ExecutorTask {
    /// Unique identifier for this task instance
    task_id: String,
    metadata: Arc<TaskMetadata>,
    executor: Arc<dyn NodeExecutor>,
}

impl ExecutorTask {
    /// Create a task from metadata and an executor
    pub fn new(
        task_id: impl Into<String>,
        metadata: TaskMetadata,
        executor: Arc<dyn NodeExecutor>,
    ) -> Self {
        Self {
            task_id: task_id.into(),
            metadata: Arc::new(metadata),
            executor,
        }
    }

    /// Create a task for a node type held by `registry`
    pub fn from_registry(
        registry: &NodeRegistry,
        node_type: &str,
        task_id: impl Into<String>,
    ) -> Result<Self> {
        let metadata = registry
            .get_metadata(node_type)
            .ok_or_else(|| NodeEngineError::UnknownNodeType(node_type.to_string()))?;
        let executor = registry.get_executor(node_type).ok_or_else(|| {
            NodeEngineError::failed(format!("No executor registered for node type '{}'", node_type))
        })?;
        Ok(Self::new(task_id, metadata.clone(), executor))
    }

    /// Get the task ID
    pub fn task_id(&self) -> &str {
        &self.task_id
    }

    /// Get the node metadata
    pub fn metadata(&self) -> &TaskMetadata {
        &self.metadata
    }
}

#[async_trait]
impl Task for ExecutorTask {
    fn id(&self) -> &str {
        &self.task_id
    }

    async fn run(&self, context: Context) -> graph_flow::Result<TaskResult> {
        let mut inputs = NodeInputs::new();
        for port in &self.metadata.inputs {
            let key = ContextKeys::input(&self.task_id, &port.id);
            if let Some(value) = context.get::<serde_json::Value>(&key).await {
                inputs.insert(port.id.clone(), value);
            }
        }

        let inputs = resolve_inputs(&self.metadata, inputs)
            .map_err(|e| GraphError::TaskExecutionFailed(e.to_string()))?;
        let outputs = self
            .executor
            .execute(&self.task_id, inputs)
            .await
            .map_err(|e| GraphError::TaskExecutionFailed(e.to_string()))?;

        for port in &self.metadata.outputs {
            if let Some(value) = outputs.get(&port.id) {
                let key = ContextKeys::output(&self.task_id, &port.id);
                context.set(&key, value.clone()).await;
            }
        }

        log::debug!(
            "{} task {}: wrote {} outputs",
            self.metadata.node_type,
            self.task_id,
            outputs.len()
        );

        let response = self
            .metadata
            .outputs
            .first()
            .and_then(|port| outputs.get(&port.id))
            .and_then(|value| value.as_str())
            .map(str::to_string);

        Ok(TaskResult::new(response, NextAction::Continue))
    }
}
