//! Registry builder
//!
//! Turns the category table into registered nodes. Runs once at startup:
//! each category becomes a selector or tag generator node, and the prompt
//! combiner is wired with one optional input per category, in table order.

use std::sync::Arc;

use node_engine::{ExecutorTask, NodeRegistry};

use crate::combiner::{CombinerInputs, PromptCombinerNode, COMBINER_NODE_TYPE};
use crate::config::{CategoryConfig, CategoryKind, PromptData};
use crate::generator::CategoryGeneratorNode;
use crate::node::{category_metadata, PromptNode};
use crate::selector::SelectorNode;

/// Node type of a category: capitalized words joined, plus `Node`
/// ("body type" becomes `BodyTypeNode`)
pub fn node_type_name(category: &str) -> String {
    let mut name: String = category.split_whitespace().map(capitalize).collect();
    name.push_str("Node");
    name
}

/// First character uppercase, the rest lowercase
fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

/// Combiner input wired to a category's node: the lowercased name with
/// spaces as underscores, plus `_tags` for generators
pub fn combiner_input_name(config: &CategoryConfig) -> String {
    let base = config.name.to_lowercase().replace(' ', "_");
    match config.kind {
        CategoryKind::Selector(_) => base,
        CategoryKind::Generator(_) => format!("{}_tags", base),
    }
}

/// All nodes built from one category table
pub struct PromptNodes {
    registry: NodeRegistry,
    combiner_inputs: CombinerInputs,
    data: Arc<PromptData>,
}

impl PromptNodes {
    /// Registry holding every node, keyed by node type
    pub fn registry(&self) -> &NodeRegistry {
        &self.registry
    }

    /// Declared combiner inputs, in fold order
    pub fn combiner_inputs(&self) -> &CombinerInputs {
        &self.combiner_inputs
    }

    /// The table the nodes were built from
    pub fn data(&self) -> &PromptData {
        &self.data
    }

    /// Bind a registered node to a task id for graph-flow execution
    pub fn task(
        &self,
        node_type: &str,
        task_id: impl Into<String>,
    ) -> node_engine::Result<ExecutorTask> {
        ExecutorTask::from_registry(&self.registry, node_type, task_id)
    }
}

/// Build and register one node per category, then the prompt combiner.
///
/// Static built-ins collected at link time are registered first. A
/// category whose node type collides with an earlier one replaces it.
pub fn build_prompt_nodes(data: Arc<PromptData>) -> PromptNodes {
    let mut registry = NodeRegistry::with_builtins();
    let mut combiner_inputs = CombinerInputs::new();

    for config in data.iter() {
        let node_type = node_type_name(&config.name);
        let metadata = category_metadata(&node_type, config);
        let node = match &config.kind {
            CategoryKind::Selector(_) => PromptNode::Selector(SelectorNode::new(&config.name)),
            CategoryKind::Generator(_) => PromptNode::CategoryGenerator(
                CategoryGeneratorNode::new(&config.name, Arc::clone(&data)),
            ),
        };

        if let Some(replaced) = registry.register(metadata, Arc::new(node)) {
            log::warn!(
                "Category '{}' replaces '{}' registered as {}",
                config.name,
                replaced.label,
                node_type
            );
        }
        combiner_inputs.declare(combiner_input_name(config));
    }

    let combiner = PromptCombinerNode::new(combiner_inputs.clone());
    if let Some(replaced) = registry.register(combiner.metadata(), Arc::new(combiner)) {
        log::warn!(
            "Prompt combiner replaces '{}' registered as {}",
            replaced.label,
            COMBINER_NODE_TYPE
        );
    }

    log::info!(
        "Registered {} prompt nodes ({} combiner inputs)",
        registry.len(),
        combiner_inputs.len()
    );

    PromptNodes {
        registry,
        combiner_inputs,
        data,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combiner::PORT_PROMPT;
    use crate::generator::{
        PORT_MODE, PORT_RANDOM_COUNT, PORT_SEED, PORT_SPECIFIC_CHOICES, PORT_TAGS,
    };
    use crate::selector::PORT_SELECTED_ITEM;
    use crate::simple_combiner::SIMPLE_COMBINER_NODE_TYPE;
    use node_engine::{NodeCategory, NodeInputs};
    use serde_json::json;

    const TABLE: &str = r#"{
        "Body Type": { "type": "selector", "items": ["None", "slim"], "default_item": "slim" },
        "hair style": {
            "type": "category_generator",
            "pool": ["long hair", "short hair"],
            "default_mode": "Specific",
            "default_count": 3
        },
        "Pose": { "type": "puppet" },
        "Eyes": { "type": "category_generator", "pool": ["blue eyes"] }
    }"#;

    fn nodes() -> PromptNodes {
        build_prompt_nodes(Arc::new(PromptData::from_json_str(TABLE).unwrap()))
    }

    #[test]
    fn test_node_type_name() {
        assert_eq!(node_type_name("Body Type"), "BodyTypeNode");
        assert_eq!(node_type_name("hair   STYLE"), "HairStyleNode");
        assert_eq!(node_type_name("Eyes"), "EyesNode");
    }

    #[test]
    fn test_combiner_input_names() {
        let data = PromptData::from_json_str(TABLE).unwrap();
        let names: Vec<String> = data.iter().map(combiner_input_name).collect();
        assert_eq!(names, vec!["body_type", "hair_style_tags", "eyes_tags"]);
    }

    #[test]
    fn test_registers_nodes_per_category() {
        let nodes = nodes();
        let registry = nodes.registry();

        assert!(registry.has_node_type("BodyTypeNode"));
        assert!(registry.has_node_type("HairStyleNode"));
        assert!(registry.has_node_type("EyesNode"));
        assert!(!registry.has_node_type("PoseNode"));
        assert!(registry.has_node_type(COMBINER_NODE_TYPE));
        assert!(registry.has_node_type(SIMPLE_COMBINER_NODE_TYPE));
        assert_eq!(registry.len(), 5);

        let hair = registry.get_metadata("HairStyleNode").unwrap();
        assert_eq!(hair.label, "hair style Generator");
        assert_eq!(hair.category, NodeCategory::Generator);
        assert_eq!(
            hair.find_input(PORT_MODE).unwrap().default_value(),
            Some(&json!("Specific"))
        );

        let names = registry.display_names();
        assert_eq!(names.get("BodyTypeNode"), Some(&"Body Type Selector"));
        assert_eq!(names.get(COMBINER_NODE_TYPE), Some(&"Prompt Combiner"));
    }

    #[test]
    fn test_combiner_wired_in_table_order() {
        let nodes = nodes();
        assert_eq!(
            nodes.combiner_inputs().names().collect::<Vec<_>>(),
            vec!["body_type", "hair_style_tags", "eyes_tags"]
        );

        let combiner = nodes.registry().get_metadata(COMBINER_NODE_TYPE).unwrap();
        let optional: Vec<&str> = combiner
            .inputs
            .iter()
            .filter(|p| !p.required)
            .map(|p| p.id.as_str())
            .collect();
        assert_eq!(optional, vec!["body_type", "hair_style_tags", "eyes_tags"]);
    }

    #[test]
    fn test_empty_table_registers_bare_combiner() {
        let nodes = build_prompt_nodes(Arc::new(PromptData::empty()));
        assert!(nodes.combiner_inputs().is_empty());
        assert!(nodes.registry().has_node_type(COMBINER_NODE_TYPE));
        assert_eq!(nodes.registry().len(), 2);
        assert!(nodes.data().is_empty());
    }

    #[test]
    fn test_colliding_node_types_last_wins() {
        let data = PromptData::from_json_str(
            r#"{
                "Hair Style": { "type": "selector", "items": ["bob"] },
                "hair style": { "type": "category_generator", "pool": ["braid"] }
            }"#,
        )
        .unwrap();
        let nodes = build_prompt_nodes(Arc::new(data));

        let meta = nodes.registry().get_metadata("HairStyleNode").unwrap();
        assert_eq!(meta.label, "hair style Generator");
        assert_eq!(
            nodes.combiner_inputs().names().collect::<Vec<_>>(),
            vec!["hair_style", "hair_style_tags"]
        );
    }

    #[test]
    fn test_combiner_replaces_colliding_category() {
        let data = PromptData::from_json_str(
            r#"{ "Prompt Combiner": { "type": "selector", "items": ["x"] } }"#,
        )
        .unwrap();
        let nodes = build_prompt_nodes(Arc::new(data));

        let meta = nodes.registry().get_metadata(COMBINER_NODE_TYPE).unwrap();
        assert_eq!(meta.label, "Prompt Combiner");
        assert_eq!(
            nodes.combiner_inputs().names().collect::<Vec<_>>(),
            vec!["prompt_combiner"]
        );
        assert!(meta.find_input("prompt_combiner").is_some());
    }

    #[tokio::test]
    async fn test_negative_count_and_seed_yield_no_tags() {
        let nodes = nodes();
        let mut inputs = NodeInputs::new();
        inputs.insert(PORT_RANDOM_COUNT.to_string(), json!(-1));
        inputs.insert(PORT_SEED.to_string(), json!(-7));

        let outputs = nodes
            .registry()
            .execute("EyesNode", "eyes-1", inputs)
            .await
            .unwrap();
        assert_eq!(outputs[PORT_TAGS], "");
    }

    #[tokio::test]
    async fn test_end_to_end_prompt() {
        let nodes = nodes();
        let registry = nodes.registry();

        let body = registry
            .execute("BodyTypeNode", "body-1", NodeInputs::new())
            .await
            .unwrap();
        assert_eq!(body[PORT_SELECTED_ITEM], "slim");

        let mut hair_inputs = NodeInputs::new();
        hair_inputs.insert(PORT_SPECIFIC_CHOICES.to_string(), json!("braid\nbangs"));
        let hair = registry
            .execute("HairStyleNode", "hair-1", hair_inputs)
            .await
            .unwrap();
        assert_eq!(hair[PORT_TAGS], "braid, bangs");

        let mut eye_inputs = NodeInputs::new();
        eye_inputs.insert(PORT_MODE.to_string(), json!("Random"));
        let eyes = registry
            .execute("EyesNode", "eyes-1", eye_inputs)
            .await
            .unwrap();
        assert_eq!(eyes[PORT_TAGS], "blue eyes");

        let mut combine_inputs = NodeInputs::new();
        combine_inputs.insert("eyes_tags".to_string(), eyes[PORT_TAGS].clone());
        combine_inputs.insert("body_type".to_string(), body[PORT_SELECTED_ITEM].clone());
        combine_inputs.insert("hair_style_tags".to_string(), hair[PORT_TAGS].clone());
        let prompt = registry
            .execute(COMBINER_NODE_TYPE, "combine-1", combine_inputs)
            .await
            .unwrap();
        assert_eq!(
            prompt[PORT_PROMPT],
            "masterpiece, best quality, slim, braid, bangs, blue eyes"
        );
    }

    #[tokio::test]
    async fn test_generator_runs_as_graph_flow_task() {
        use graph_flow::{Context, Task};
        use node_engine::ContextKeys;

        let nodes = nodes();
        let task = nodes.task("HairStyleNode", "hair_1").unwrap();
        let context = Context::new();
        context
            .set(&ContextKeys::input("hair_1", PORT_SPECIFIC_CHOICES), "bob cut".to_string())
            .await;

        let result = task.run(context.clone()).await.unwrap();
        assert_eq!(result.response.as_deref(), Some("bob cut"));

        let output: Option<String> = context.get(&ContextKeys::output("hair_1", PORT_TAGS)).await;
        assert_eq!(output, Some("bob cut".to_string()));
    }
}
