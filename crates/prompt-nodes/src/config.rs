//! Category table
//!
//! The category table is a JSON object with one entry per prompt category.
//! Object key order is significant: it is the order nodes are built in and
//! the order the prompt combiner folds their tags.
//!
//! ```json
//! {
//!   "Body Type": { "type": "selector", "items": ["None", "slim", "muscular"] },
//!   "Hair": {
//!     "type": "category_generator",
//!     "pool": ["long hair", "short hair", "ponytail"],
//!     "default_mode": "Random",
//!     "default_count": 1
//!   }
//! }
//! ```
//!
//! The table is loaded once at startup and shared read-only afterwards.

use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::error::ConfigError;
use crate::generator::TagMode;

/// `type` value of selector entries
pub const SELECTOR_TYPE: &str = "selector";
/// `type` value of tag generator entries
pub const GENERATOR_TYPE: &str = "category_generator";

/// Fields of a selector entry
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SelectorConfig {
    /// Selectable items, in display order
    #[serde(default)]
    pub items: Vec<String>,
    /// Preferred default item
    #[serde(default, deserialize_with = "lenient_default_item")]
    pub default_item: Option<String>,
}

/// Fields of a tag generator entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Candidate tags for random sampling
    #[serde(default)]
    pub pool: Vec<String>,
    /// Mode preselected on the node
    #[serde(default, deserialize_with = "lenient_default_mode")]
    pub default_mode: TagMode,
    /// Random count preselected on the node
    #[serde(default = "default_count", deserialize_with = "lenient_default_count")]
    pub default_count: i64,
}

fn default_count() -> i64 {
    1
}

// Widget defaults: a malformed value is logged and replaced, the entry stays.

fn lenient_default_item<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
    Ok(match Value::deserialize(d)? {
        Value::String(item) => Some(item),
        Value::Null => None,
        other => {
            log::warn!("Ignoring non-string default_item {}", other);
            None
        }
    })
}

fn lenient_default_mode<'de, D: Deserializer<'de>>(d: D) -> Result<TagMode, D::Error> {
    let value = Value::deserialize(d)?;
    Ok(value
        .as_str()
        .and_then(|mode| mode.parse().ok())
        .unwrap_or_else(|| {
            log::warn!("Unknown default_mode {}; using {}", value, TagMode::default());
            TagMode::default()
        }))
}

fn lenient_default_count<'de, D: Deserializer<'de>>(d: D) -> Result<i64, D::Error> {
    let value = Value::deserialize(d)?;
    Ok(value.as_i64().unwrap_or_else(|| {
        log::warn!("Invalid default_count {}; using {}", value, default_count());
        default_count()
    }))
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            pool: Vec::new(),
            default_mode: TagMode::default(),
            default_count: default_count(),
        }
    }
}

/// What kind of node a category becomes
#[derive(Debug, Clone, PartialEq)]
pub enum CategoryKind {
    Selector(SelectorConfig),
    Generator(GeneratorConfig),
}

/// One entry of the category table
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryConfig {
    /// Category name, the table key (e.g. "Body Type")
    pub name: String,
    pub kind: CategoryKind,
}

impl CategoryConfig {
    /// Parse one table entry. Returns `None` for unknown or malformed
    /// entries, which are logged and skipped.
    fn from_entry(name: &str, entry: serde_json::Value) -> Option<Self> {
        let node_type = entry
            .get("type")
            .and_then(|t| t.as_str())
            .map(str::to_string);

        let kind = match node_type.as_deref() {
            Some(SELECTOR_TYPE) => serde_json::from_value(entry).map(CategoryKind::Selector),
            Some(GENERATOR_TYPE) => serde_json::from_value(entry).map(CategoryKind::Generator),
            other => {
                log::warn!(
                    "Unknown node type '{}' for category '{}'. Skipping.",
                    other.unwrap_or("None"),
                    name
                );
                return None;
            }
        };

        match kind {
            Ok(kind) => Some(Self {
                name: name.to_string(),
                kind,
            }),
            Err(e) => {
                log::warn!("Malformed entry for category '{}': {}. Skipping.", name, e);
                None
            }
        }
    }
}

/// The loaded category table, in table order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PromptData {
    categories: IndexMap<String, CategoryConfig>,
}

impl PromptData {
    /// An empty table
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a table from already parsed categories, keeping their order
    pub fn from_categories(categories: impl IntoIterator<Item = CategoryConfig>) -> Self {
        Self {
            categories: categories
                .into_iter()
                .map(|c| (c.name.clone(), c))
                .collect(),
        }
    }

    /// Parse a table from JSON text
    pub fn from_json_str(json: &str) -> serde_json::Result<Self> {
        let raw: IndexMap<String, serde_json::Value> = serde_json::from_str(json)?;
        Ok(Self::from_categories(raw.into_iter().filter_map(
            |(name, entry)| CategoryConfig::from_entry(&name, entry),
        )))
    }

    /// Load a table from a JSON file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let data = Self::from_json_str(&json).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        log::info!("Loaded {} categories from {:?}", data.len(), path);
        Ok(data)
    }

    /// Load a table, falling back to an empty one on any failure
    pub fn load_or_empty(path: &Path) -> Self {
        match Self::load(path) {
            Ok(data) => data,
            Err(e) => {
                log::error!("{}", e);
                Self::empty()
            }
        }
    }

    /// Look up a category by name
    pub fn get(&self, name: &str) -> Option<&CategoryConfig> {
        self.categories.get(name)
    }

    /// Pool of a generator category; empty for anything else
    pub fn pool(&self, name: &str) -> &[String] {
        match self.get(name).map(|c| &c.kind) {
            Some(CategoryKind::Generator(generator)) => generator.pool.as_slice(),
            _ => &[],
        }
    }

    /// Categories in table order
    pub fn iter(&self) -> impl Iterator<Item = &CategoryConfig> {
        self.categories.values()
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}
