//! Prompt Combiner
//!
//! Folds a prefix, the tag strings of every category node and a suffix into
//! one prompt. Category inputs are folded in the order they were declared
//! while the registry was built, which is the category table order.

use std::collections::HashMap;

use indexmap::IndexMap;
use node_engine::{
    inputs, NodeCategory, NodeInputs, NodeOutputs, PortDataType, PortMetadata, PortOptions,
    TaskMetadata,
};
use regex::{NoExpand, Regex};

use crate::text::split_tags;
use crate::NODE_GROUP;

/// Node type of the prompt combiner
pub const COMBINER_NODE_TYPE: &str = "PromptCombinerNode";

/// Port ID for the leading tags
pub const PORT_PREFIX_TAGS: &str = "prefix_tags";
/// Port ID for the join separator
pub const PORT_SEPARATOR: &str = "separator";
/// Port ID for the trailing tags
pub const PORT_SUFFIX_TAGS: &str = "suffix_tags";
/// Port ID for the combined prompt
pub const PORT_PROMPT: &str = "prompt";

/// Default value of the prefix widget
pub const DEFAULT_PREFIX: &str = "masterpiece, best quality";
/// Default value of the separator widget
pub const DEFAULT_SEPARATOR: &str = ", ";

/// Named optional inputs of the combiner, in fold order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CombinerInputs {
    inputs: IndexMap<String, PortDataType>,
}

impl CombinerInputs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a string input. A name declared twice keeps its first
    /// position; returns `false` in that case.
    pub fn declare(&mut self, name: impl Into<String>) -> bool {
        self.inputs.insert(name.into(), PortDataType::String).is_none()
    }

    /// Declared names, in fold order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.inputs.keys().map(String::as_str)
    }

    /// Declared names with their port types, in fold order
    pub fn iter(&self) -> impl Iterator<Item = (&str, PortDataType)> {
        self.inputs.iter().map(|(name, ty)| (name.as_str(), *ty))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.inputs.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.inputs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inputs.is_empty()
    }
}

/// Combine prefix, declared tag strings and suffix into one prompt.
///
/// Names in `tag_strings` that were never declared are ignored. Runs of the
/// separator left over from joining already joined tag strings are collapsed
/// and a dangling separator at either end is removed; both steps are skipped
/// for a whitespace-only separator.
pub fn combine_prompt(
    prefix: &str,
    separator: &str,
    suffix: &str,
    declared: &CombinerInputs,
    tag_strings: &HashMap<String, String>,
) -> String {
    let mut parts = split_tags(prefix);

    for name in declared.names() {
        if let Some(tags) = tag_strings.get(name) {
            if !tags.trim().is_empty() {
                parts.extend(split_tags(tags));
            }
        }
    }

    parts.extend(split_tags(suffix));

    let joined = parts
        .iter()
        .filter(|part| !part.is_empty())
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(separator);

    clean_separators(&joined, separator).trim().to_string()
}

/// Collapse repeated separators and strip one at each end
fn clean_separators(prompt: &str, separator: &str) -> String {
    let sep = separator.trim();
    if sep.is_empty() {
        return prompt.to_string();
    }

    let escaped = regex::escape(sep);
    let patterns = Regex::new(&format!(r"{escaped}(\s*{escaped})+")).and_then(|repeated| {
        Regex::new(&format!(r"^\s*{escaped}\s*|\s*{escaped}\s*$")).map(|edges| (repeated, edges))
    });

    match patterns {
        Ok((repeated, edges)) => {
            let collapsed = repeated.replace_all(prompt, NoExpand(sep));
            edges.replace_all(&collapsed, "").into_owned()
        }
        Err(e) => {
            log::warn!("Cannot clean separator {:?}: {}", separator, e);
            prompt.to_string()
        }
    }
}

/// The prompt combiner node, wired to the declared category inputs
#[derive(Debug, Clone, Default)]
pub struct PromptCombinerNode {
    inputs: CombinerInputs,
}

impl PromptCombinerNode {
    pub fn new(inputs: CombinerInputs) -> Self {
        Self { inputs }
    }

    pub fn inputs(&self) -> &CombinerInputs {
        &self.inputs
    }

    /// Fixed inputs followed by one optional string input per declared name
    pub fn metadata(&self) -> TaskMetadata {
        let mut metadata =
            TaskMetadata::new(COMBINER_NODE_TYPE, NodeCategory::Combiner, "Prompt Combiner")
                .group(NODE_GROUP)
                .description("Combines prefix, category tags and suffix into one prompt")
                .input(
                    PortMetadata::required(PORT_PREFIX_TAGS, "Prefix Tags", PortDataType::String)
                        .with_options(PortOptions::with_default(DEFAULT_PREFIX).multiline()),
                )
                .input(
                    PortMetadata::required(PORT_SEPARATOR, "Separator", PortDataType::String)
                        .with_options(PortOptions::with_default(DEFAULT_SEPARATOR)),
                )
                .input(
                    PortMetadata::required(PORT_SUFFIX_TAGS, "Suffix Tags", PortDataType::String)
                        .with_options(PortOptions::with_default("").multiline()),
                );

        for (name, data_type) in self.inputs.iter() {
            metadata = metadata.input(
                PortMetadata::optional(name, name, data_type)
                    .with_options(PortOptions::with_default("")),
            );
        }

        metadata.output(PortMetadata::output(PORT_PROMPT, "Prompt", PortDataType::Prompt))
    }

    /// Combine the named inputs into the `prompt` output
    pub fn run(&self, inputs: &NodeInputs) -> node_engine::Result<NodeOutputs> {
        let prefix = inputs::string(inputs, PORT_PREFIX_TAGS)?;
        let separator = inputs::string(inputs, PORT_SEPARATOR)?;
        let suffix = inputs::string(inputs, PORT_SUFFIX_TAGS)?;

        let mut tag_strings = HashMap::new();
        for name in self.inputs.names() {
            if let Some(tags) = inputs::optional_string(inputs, name)? {
                tag_strings.insert(name.to_string(), tags);
            }
        }

        let prompt = combine_prompt(&prefix, &separator, &suffix, &self.inputs, &tag_strings);
        log::debug!(
            "Prompt combiner: folded {} inputs into {} chars",
            tag_strings.len(),
            prompt.len()
        );
        Ok(inputs::single_output(PORT_PROMPT, prompt))
    }
}
