//! Category-backed prompt nodes
//!
//! Every category of the table becomes one of two node kinds. `PromptNode`
//! is the closed set of those kinds; each variant declares its input schema
//! and produces its single output the same way, so the registry builder and
//! the executor dispatch never need to know more than this enum.

use async_trait::async_trait;
use node_engine::{NodeExecutor, NodeInputs, NodeOutputs, TaskMetadata};

use crate::combiner::PromptCombinerNode;
use crate::config::{CategoryConfig, CategoryKind};
use crate::generator::CategoryGeneratorNode;
use crate::selector::SelectorNode;

/// A node synthesized from one category of the table
#[derive(Clone)]
pub enum PromptNode {
    Selector(SelectorNode),
    CategoryGenerator(CategoryGeneratorNode),
}

impl PromptNode {
    /// Category this node was built from
    pub fn category(&self) -> &str {
        match self {
            PromptNode::Selector(node) => node.category(),
            PromptNode::CategoryGenerator(node) => node.category(),
        }
    }

    /// Run the node on resolved inputs
    pub fn run(&self, inputs: &NodeInputs) -> node_engine::Result<NodeOutputs> {
        match self {
            PromptNode::Selector(node) => node.run(inputs),
            PromptNode::CategoryGenerator(node) => node.run(inputs),
        }
    }
}

/// Input schema of the node built for `config`
pub fn category_metadata(node_type: &str, config: &CategoryConfig) -> TaskMetadata {
    match &config.kind {
        CategoryKind::Selector(selector) => {
            SelectorNode::metadata(node_type, &config.name, selector)
        }
        CategoryKind::Generator(generator) => {
            CategoryGeneratorNode::metadata(node_type, &config.name, generator)
        }
    }
}

#[async_trait]
impl NodeExecutor for PromptNode {
    async fn execute(&self, task_id: &str, inputs: NodeInputs) -> node_engine::Result<NodeOutputs> {
        log::debug!("{} node {}: running", self.category(), task_id);
        self.run(&inputs)
    }
}

#[async_trait]
impl NodeExecutor for PromptCombinerNode {
    async fn execute(&self, task_id: &str, inputs: NodeInputs) -> node_engine::Result<NodeOutputs> {
        log::debug!("Prompt combiner {}: running", task_id);
        self.run(&inputs)
    }
}
