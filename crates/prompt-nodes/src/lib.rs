//! Prompt Nodes
//!
//! Prompt-building nodes for node-based image generation hosts. A category
//! table (one JSON entry per prompt category) is turned into nodes at
//! startup:
//!
//! - **Selector**: pick one item of a category from a dropdown
//! - **Category Generator**: sample tags from the category pool, take an
//!   explicit list, or emit nothing
//! - **Prompt Combiner**: fold a prefix, every category's tags (in table
//!   order) and a suffix into one prompt
//! - **Simple Text Combiner**: a static combiner of one text field and five
//!   text pins, available without any table
//!
//! # Example
//!
//! ```ignore
//! let nodes = prompt_nodes::setup_prompt_nodes(None);
//! let outputs = nodes
//!     .registry()
//!     .execute("PromptCombinerNode", "combine-1", inputs)
//!     .await?;
//! ```

pub mod builder;
pub mod combiner;
pub mod config;
pub mod error;
pub mod generator;
pub mod node;
pub mod selector;
pub mod setup;
pub mod simple_combiner;
pub mod text;

/// Menu group shared by every node of this crate
pub const NODE_GROUP: &str = "MyPromptSystem";

pub use builder::{build_prompt_nodes, combiner_input_name, node_type_name, PromptNodes};
pub use combiner::{combine_prompt, CombinerInputs, PromptCombinerNode};
pub use config::{CategoryConfig, CategoryKind, GeneratorConfig, PromptData, SelectorConfig};
pub use error::ConfigError;
pub use generator::{generate_tags, CategoryGeneratorNode, TagMode};
pub use node::PromptNode;
pub use selector::{select_item, SelectorNode};
pub use setup::{load_prompt_data, setup_prompt_nodes};
pub use simple_combiner::{combine_text, SimpleTextCombinerNode};
pub use text::{join_tags, split_tags};
