//! Selector
//!
//! A selector node lets the user pick one item of a category from a
//! dropdown and passes it through unchanged.

use node_engine::{
    inputs, NodeCategory, NodeInputs, NodeOutputs, PortDataType, PortMetadata, PortOptions,
    TaskMetadata,
};

use crate::config::SelectorConfig;
use crate::NODE_GROUP;

/// Port ID for the picked item
pub const PORT_ITEM: &str = "item";
/// Port ID for the passed-through item
pub const PORT_SELECTED_ITEM: &str = "selected_item";

/// Item preselected when the configured default is unusable
const NONE_ITEM: &str = "None";

/// Pass the chosen item through unchanged
pub fn select_item(item: &str) -> String {
    item.to_string()
}

/// Default item of a selector: the configured default when it is one of the
/// items, else `"None"` when present, else the first item, else `""`.
pub fn default_item(config: &SelectorConfig) -> String {
    let items = &config.items;
    match config.default_item.as_deref() {
        Some(default) if !default.is_empty() && items.iter().any(|i| i == default) => {
            default.to_string()
        }
        _ if items.iter().any(|i| i == NONE_ITEM) => NONE_ITEM.to_string(),
        _ => items.first().cloned().unwrap_or_default(),
    }
}

/// A selector node bound to one category of the table
#[derive(Debug, Clone)]
pub struct SelectorNode {
    category: String,
}

impl SelectorNode {
    pub fn new(category: impl Into<String>) -> Self {
        Self {
            category: category.into(),
        }
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    /// Input schema for a selector built from `config`
    pub fn metadata(node_type: &str, category: &str, config: &SelectorConfig) -> TaskMetadata {
        TaskMetadata::new(node_type, NodeCategory::Input, format!("{} Selector", category))
            .group(NODE_GROUP)
            .description(format!("Picks one {} item", category.to_lowercase()))
            .input(
                PortMetadata::required(PORT_ITEM, "Item", PortDataType::Choice).with_options(
                    PortOptions::choice(config.items.clone(), default_item(config)),
                ),
            )
            .output(PortMetadata::output(
                PORT_SELECTED_ITEM,
                "Selected Item",
                PortDataType::String,
            ))
    }

    /// Pass the `item` input through
    pub fn run(&self, inputs: &NodeInputs) -> node_engine::Result<NodeOutputs> {
        let item = select_item(&inputs::string(inputs, PORT_ITEM)?);
        log::debug!("{} selector: '{}'", self.category, item);
        Ok(inputs::single_output(PORT_SELECTED_ITEM, item))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn config(items: &[&str], default: Option<&str>) -> SelectorConfig {
        SelectorConfig {
            items: items.iter().map(|i| i.to_string()).collect(),
            default_item: default.map(str::to_string),
        }
    }

    #[test]
    fn test_select_passthrough() {
        assert_eq!(select_item("foo"), "foo");
        assert_eq!(select_item(""), "");
    }

    #[test]
    fn test_default_item_prefers_configured_member() {
        assert_eq!(default_item(&config(&["None", "slim"], Some("slim"))), "slim");
    }

    #[test]
    fn test_default_item_falls_back_to_none() {
        assert_eq!(default_item(&config(&["slim", "None"], Some("giant"))), "None");
        assert_eq!(default_item(&config(&["slim", "None"], None)), "None");
        assert_eq!(default_item(&config(&["slim", "None"], Some(""))), "None");
    }

    #[test]
    fn test_default_item_falls_back_to_first_or_empty() {
        assert_eq!(default_item(&config(&["slim", "tall"], Some("giant"))), "slim");
        assert_eq!(default_item(&config(&[], Some("giant"))), "");
    }

    #[test]
    fn test_metadata() {
        let meta = SelectorNode::metadata("BodyTypeNode", "Body Type", &config(&["None", "slim"], None));
        assert_eq!(meta.node_type, "BodyTypeNode");
        assert_eq!(meta.label, "Body Type Selector");
        assert_eq!(meta.category, NodeCategory::Input);

        let item = meta.find_input(PORT_ITEM).unwrap();
        assert_eq!(item.options.choices, vec!["None", "slim"]);
        assert_eq!(item.default_value(), Some(&json!("None")));
        assert_eq!(meta.outputs[0].id, PORT_SELECTED_ITEM);
    }

    #[test]
    fn test_run() {
        let node = SelectorNode::new("Body Type");
        let mut inputs = NodeInputs::new();
        inputs.insert(PORT_ITEM.to_string(), json!("slim"));

        let outputs = node.run(&inputs).unwrap();
        assert_eq!(outputs[PORT_SELECTED_ITEM], "slim");
        assert!(node.run(&NodeInputs::new()).is_err());
    }
}
