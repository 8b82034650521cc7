//! Simple Text Combiner
//!
//! A fixed-shape combiner that needs no category table: one main text field
//! plus five optional text pins, all split into tags and joined with `", "`.

use std::sync::Arc;

use async_trait::async_trait;
use node_engine::{
    inputs, NodeCategory, NodeExecutor, NodeInputs, NodeOutputs, PortDataType, PortMetadata,
    PortOptions, TaskDescriptor, TaskMetadata,
};

use crate::text::{join_tags, split_tags};
use crate::NODE_GROUP;

/// Node type of the simple text combiner
pub const SIMPLE_COMBINER_NODE_TYPE: &str = "SimpleTextCombinerNode";

/// Port ID for the main text field
pub const PORT_MAIN_TEXT: &str = "main_text";
/// Port IDs of the optional text pins, in fold order
pub const PORT_TEXTS: [&str; 5] = ["text_1", "text_2", "text_3", "text_4", "text_5"];
/// Port ID for the combined prompt
pub const PORT_PROMPT: &str = "prompt";

/// Split `main_text` and every present text, then join all tags with `", "`
pub fn combine_text(main_text: &str, texts: [Option<&str>; 5]) -> String {
    let mut parts = split_tags(main_text);
    for text in texts.into_iter().flatten() {
        if !text.is_empty() {
            parts.extend(split_tags(text));
        }
    }
    join_tags(&parts)
}

/// Simple Text Combiner node
#[derive(Debug, Clone, Copy, Default)]
pub struct SimpleTextCombinerNode;

impl TaskDescriptor for SimpleTextCombinerNode {
    fn descriptor() -> TaskMetadata {
        let mut metadata = TaskMetadata::new(
            SIMPLE_COMBINER_NODE_TYPE,
            NodeCategory::Combiner,
            "Simple Text Combiner",
        )
        .group(NODE_GROUP)
        .description("Joins a text field and up to five text pins into one prompt")
        .input(
            PortMetadata::required(PORT_MAIN_TEXT, "Main Text", PortDataType::String)
                .with_options(PortOptions::with_default("").multiline()),
        );

        for (i, port) in PORT_TEXTS.iter().enumerate() {
            metadata = metadata.input(
                PortMetadata::optional(*port, format!("Text {}", i + 1), PortDataType::String)
                    .with_options(PortOptions::default().force_input()),
            );
        }

        metadata.output(PortMetadata::output(PORT_PROMPT, "Prompt", PortDataType::Prompt))
    }
}

inventory::submit!(node_engine::DescriptorFn(SimpleTextCombinerNode::descriptor));

inventory::submit!(node_engine::ExecutorFn {
    node_type: SIMPLE_COMBINER_NODE_TYPE,
    executor: || Arc::new(SimpleTextCombinerNode),
});

#[async_trait]
impl NodeExecutor for SimpleTextCombinerNode {
    async fn execute(&self, task_id: &str, inputs: NodeInputs) -> node_engine::Result<NodeOutputs> {
        let main_text = inputs::string(&inputs, PORT_MAIN_TEXT)?;
        let mut texts: [Option<String>; 5] = Default::default();
        for (slot, port) in texts.iter_mut().zip(PORT_TEXTS) {
            *slot = inputs::optional_string(&inputs, port)?;
        }

        let prompt = combine_text(&main_text, texts.each_ref().map(|t| t.as_deref()));
        log::debug!("SimpleTextCombiner {}: {} chars", task_id, prompt.len());
        Ok(inputs::single_output(PORT_PROMPT, prompt))
    }
}
