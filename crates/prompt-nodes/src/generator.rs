//! Category Generator
//!
//! Produces a tag string for one category: a seeded random sample from the
//! category's pool, an explicit user-typed list, or nothing.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use indexmap::IndexSet;
use node_engine::{
    inputs, NodeCategory, NodeEngineError, NodeInputs, NodeOutputs, PortDataType, PortMetadata,
    PortOptions, TaskMetadata,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use crate::config::{GeneratorConfig, PromptData};
use crate::text::{join_tags, split_tags};
use crate::NODE_GROUP;

/// How a generator picks its tags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TagMode {
    /// Seeded sample from the pool, without replacement
    #[default]
    Random,
    /// Tags typed into `specific_choices`
    Specific,
    /// No tags
    None,
}

impl TagMode {
    /// All modes, in the order offered to the user
    pub const ALL: [TagMode; 3] = [TagMode::Random, TagMode::Specific, TagMode::None];

    pub fn as_str(&self) -> &'static str {
        match self {
            TagMode::Random => "Random",
            TagMode::Specific => "Specific",
            TagMode::None => "None",
        }
    }

    /// Mode names for a choice port
    pub fn choices() -> Vec<String> {
        Self::ALL.iter().map(|m| m.as_str().to_string()).collect()
    }
}

impl fmt::Display for TagMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TagMode {
    type Err = NodeEngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|m| m.as_str() == s)
            .ok_or_else(|| NodeEngineError::invalid_input(PORT_MODE, "Random, Specific or None"))
    }
}

/// Port ID for the enable toggle
pub const PORT_ENABLE: &str = "enable";
/// Port ID for the mode choice
pub const PORT_MODE: &str = "mode";
/// Port ID for the random sample size
pub const PORT_RANDOM_COUNT: &str = "random_count";
/// Port ID for the explicit tag list
pub const PORT_SPECIFIC_CHOICES: &str = "specific_choices";
/// Port ID for the sampling seed
pub const PORT_SEED: &str = "seed";
/// Port ID for the generated tag string
pub const PORT_TAGS: &str = "tags";

/// Upper bound of the random count widget
pub const MAX_RANDOM_COUNT: u64 = 50;

/// Generate a tag string.
///
/// Disabled generators always yield `""`. In `Random` mode at most
/// `count` distinct pool entries are drawn; the same seed, pool and count
/// always yield the same tags. `Specific` mode ignores count, seed and pool.
pub fn generate_tags(
    enabled: bool,
    mode: TagMode,
    count: u64,
    explicit_text: &str,
    seed: u64,
    pool: &[String],
) -> String {
    if !enabled {
        return String::new();
    }

    let tags = match mode {
        TagMode::Random => sample_pool(pool, count, seed),
        TagMode::Specific => split_tags(explicit_text),
        TagMode::None => Vec::new(),
    };

    join_tags(&tags)
}

/// Draw up to `count` distinct entries from `pool` using a generator seeded
/// with `seed`
fn sample_pool(pool: &[String], count: u64, seed: u64) -> Vec<String> {
    let distinct: IndexSet<&str> = pool.iter().map(String::as_str).collect();
    let amount = usize::try_from(count).unwrap_or(usize::MAX).min(distinct.len());
    if amount == 0 {
        return Vec::new();
    }

    let mut rng = StdRng::seed_from_u64(seed);
    rand::seq::index::sample(&mut rng, distinct.len(), amount)
        .into_iter()
        .filter_map(|i| distinct.get_index(i))
        .map(|tag| tag.to_string())
        .collect()
}

/// A tag generator node bound to one category of the table
#[derive(Clone)]
pub struct CategoryGeneratorNode {
    category: String,
    data: Arc<PromptData>,
}

impl CategoryGeneratorNode {
    pub fn new(category: impl Into<String>, data: Arc<PromptData>) -> Self {
        Self {
            category: category.into(),
            data,
        }
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    /// Input schema for a generator built from `config`
    pub fn metadata(node_type: &str, category: &str, config: &GeneratorConfig) -> TaskMetadata {
        let default_count = config.default_count.clamp(0, MAX_RANDOM_COUNT as i64) as u64;

        TaskMetadata::new(node_type, NodeCategory::Generator, format!("{} Generator", category))
            .group(NODE_GROUP)
            .description(format!("Generates {} tags", category.to_lowercase()))
            .input(
                PortMetadata::required(PORT_ENABLE, "Enable", PortDataType::Boolean)
                    .with_options(PortOptions::with_default(true)),
            )
            .input(
                PortMetadata::required(PORT_MODE, "Mode", PortDataType::Choice).with_options(
                    PortOptions::choice(TagMode::choices(), config.default_mode.as_str()),
                ),
            )
            .input(
                PortMetadata::required(PORT_RANDOM_COUNT, "Random Count", PortDataType::Number)
                    .with_options(PortOptions::bounded(default_count, 0, MAX_RANDOM_COUNT)),
            )
            .input(
                PortMetadata::required(
                    PORT_SPECIFIC_CHOICES,
                    "Specific Choices",
                    PortDataType::String,
                )
                .with_options(PortOptions::with_default("").multiline()),
            )
            .input(
                PortMetadata::required(PORT_SEED, "Seed", PortDataType::Number)
                    .with_options(PortOptions::bounded(0, 0, u64::MAX)),
            )
            .output(PortMetadata::output(PORT_TAGS, "Tags", PortDataType::String))
    }

    /// Generate tags from named inputs
    pub fn run(&self, inputs: &NodeInputs) -> node_engine::Result<NodeOutputs> {
        if !inputs::boolean(inputs, PORT_ENABLE)? {
            return Ok(inputs::single_output(PORT_TAGS, ""));
        }

        let mode: TagMode = inputs::string(inputs, PORT_MODE)?.parse()?;
        let count = inputs::unsigned(inputs, PORT_RANDOM_COUNT)?;
        let explicit = inputs::string(inputs, PORT_SPECIFIC_CHOICES)?;
        let seed = inputs::unsigned(inputs, PORT_SEED)?;

        let tags = generate_tags(
            true,
            mode,
            count,
            &explicit,
            seed,
            self.data.pool(&self.category),
        );
        log::debug!(
            "{} generator ({}): produced '{}'",
            self.category,
            mode,
            tags
        );
        Ok(inputs::single_output(PORT_TAGS, tags))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{CategoryConfig, CategoryKind};
    use serde_json::json;
    use std::collections::HashSet;

    fn pool(tags: &[&str]) -> Vec<String> {
        tags.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn test_disabled_returns_empty() {
        let p = pool(&["a", "b"]);
        assert_eq!(generate_tags(false, TagMode::Random, 2, "", 1, &p), "");
        assert_eq!(generate_tags(false, TagMode::Specific, 0, "x, y", 0, &p), "");
        assert_eq!(generate_tags(false, TagMode::None, 5, "x", 9, &[]), "");
    }

    #[test]
    fn test_random_is_deterministic() {
        let p = pool(&["a", "b", "c", "d", "e", "f", "g"]);
        let first = generate_tags(true, TagMode::Random, 3, "", 42, &p);
        let second = generate_tags(true, TagMode::Random, 3, "", 42, &p);
        assert_eq!(first, second);
        assert!(!first.is_empty());
    }

    #[test]
    fn test_random_sample_validity() {
        let p = pool(&["a", "b", "c", "d", "e"]);
        for seed in 0..20 {
            for count in 0..8 {
                let result = generate_tags(true, TagMode::Random, count, "", seed, &p);
                let tags = split_tags(&result);
                let unique: HashSet<&String> = tags.iter().collect();

                assert_eq!(tags.len(), (count as usize).min(p.len()));
                assert_eq!(unique.len(), tags.len());
                assert!(tags.iter().all(|t| p.contains(t)));
            }
        }
    }

    #[test]
    fn test_random_never_repeats_duplicate_pool_entries() {
        let p = pool(&["a", "a", "b", "b"]);
        let result = generate_tags(true, TagMode::Random, 4, "", 7, &p);
        let tags = split_tags(&result);
        assert_eq!(tags.len(), 2);
        assert_ne!(tags[0], tags[1]);
    }

    #[test]
    fn test_random_empty_pool_or_zero_count() {
        assert_eq!(generate_tags(true, TagMode::Random, 3, "", 1, &[]), "");
        assert_eq!(generate_tags(true, TagMode::Random, 0, "", 1, &pool(&["a"])), "");
    }

    #[test]
    fn test_specific_ignores_pool_seed_and_count() {
        let first = generate_tags(true, TagMode::Specific, 0, "a, b", 1, &pool(&["x"]));
        let second = generate_tags(true, TagMode::Specific, 9, "a, b", 99, &[]);
        assert_eq!(first, "a, b");
        assert_eq!(second, "a, b");
    }

    #[test]
    fn test_specific_normalizes_text() {
        let result = generate_tags(true, TagMode::Specific, 0, " a ,\n b\n\n, ", 0, &[]);
        assert_eq!(result, "a, b");
    }

    #[test]
    fn test_none_mode() {
        assert_eq!(generate_tags(true, TagMode::None, 3, "a", 1, &pool(&["a"])), "");
    }

    #[test]
    fn test_tag_mode_parse() {
        assert_eq!("Specific".parse::<TagMode>().unwrap(), TagMode::Specific);
        assert!("random".parse::<TagMode>().is_err());
        assert_eq!(TagMode::choices(), vec!["Random", "Specific", "None"]);
    }

    #[test]
    fn test_metadata_defaults() {
        let config = GeneratorConfig {
            pool: pool(&["a"]),
            default_mode: TagMode::Specific,
            default_count: 80,
        };
        let meta = CategoryGeneratorNode::metadata("HairNode", "Hair", &config);

        assert_eq!(meta.label, "Hair Generator");
        assert_eq!(meta.group, NODE_GROUP);
        let ids: Vec<&str> = meta.inputs.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["enable", "mode", "random_count", "specific_choices", "seed"]);

        let count = meta.find_input(PORT_RANDOM_COUNT).unwrap();
        assert_eq!(count.default_value(), Some(&json!(50)));
        assert_eq!(count.options.max, Some(MAX_RANDOM_COUNT));

        let mode = meta.find_input(PORT_MODE).unwrap();
        assert_eq!(mode.default_value(), Some(&json!("Specific")));

        let seed = meta.find_input(PORT_SEED).unwrap();
        assert_eq!(seed.options.max, Some(u64::MAX));
        assert_eq!(meta.outputs[0].id, PORT_TAGS);
    }

    fn hair_node() -> CategoryGeneratorNode {
        let data = PromptData::from_categories([CategoryConfig {
            name: "Hair".to_string(),
            kind: CategoryKind::Generator(GeneratorConfig {
                pool: pool(&["long hair", "short hair", "braid"]),
                ..GeneratorConfig::default()
            }),
        }]);
        CategoryGeneratorNode::new("Hair", Arc::new(data))
    }

    fn generator_inputs(enable: bool, mode: &str, count: u64, seed: u64) -> NodeInputs {
        let mut inputs = NodeInputs::new();
        inputs.insert(PORT_ENABLE.to_string(), json!(enable));
        inputs.insert(PORT_MODE.to_string(), json!(mode));
        inputs.insert(PORT_RANDOM_COUNT.to_string(), json!(count));
        inputs.insert(PORT_SPECIFIC_CHOICES.to_string(), json!("tiara"));
        inputs.insert(PORT_SEED.to_string(), json!(seed));
        inputs
    }

    #[test]
    fn test_run_uses_category_pool() {
        let node = hair_node();
        let outputs = node.run(&generator_inputs(true, "Random", 2, 5)).unwrap();
        let tags = split_tags(outputs[PORT_TAGS].as_str().unwrap());
        assert_eq!(tags.len(), 2);
        assert!(tags
            .iter()
            .all(|t| ["long hair", "short hair", "braid"].contains(&t.as_str())));
    }

    #[test]
    fn test_run_disabled_skips_input_parsing() {
        let node = hair_node();
        let mut inputs = NodeInputs::new();
        inputs.insert(PORT_ENABLE.to_string(), json!(false));
        let outputs = node.run(&inputs).unwrap();
        assert_eq!(outputs[PORT_TAGS], "");
    }

    #[test]
    fn test_run_specific_and_bad_mode() {
        let node = hair_node();
        let outputs = node.run(&generator_inputs(true, "Specific", 2, 5)).unwrap();
        assert_eq!(outputs[PORT_TAGS], "tiara");

        let result = node.run(&generator_inputs(true, "Sometimes", 2, 5));
        assert!(matches!(result, Err(NodeEngineError::InvalidInputType { .. })));
    }
}
