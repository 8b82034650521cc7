//! Startup setup for host applications.
//!
//! Hosts call [`setup_prompt_nodes`] once at startup. It locates the
//! category table, loads it, and builds every node. Setup never fails: a
//! missing or broken table leaves only the built-in nodes and a prompt
//! combiner without category inputs.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::builder::{build_prompt_nodes, PromptNodes};
use crate::config::PromptData;

/// Environment variable naming the category table file
pub const PROMPT_DATA_ENV: &str = "PROMPT_DATA_PATH";
/// File name looked up in the working directory as a last resort
pub const DEFAULT_PROMPT_DATA_FILE: &str = "prompt_data.json";

/// Candidate table locations, in lookup order
fn candidate_paths(explicit_path: Option<&Path>) -> Vec<PathBuf> {
    let mut candidates = Vec::new();
    if let Some(p) = explicit_path {
        candidates.push(p.to_path_buf());
    }
    if let Ok(env_path) = std::env::var(PROMPT_DATA_ENV) {
        candidates.push(PathBuf::from(env_path));
    }
    candidates.push(PathBuf::from(DEFAULT_PROMPT_DATA_FILE));
    candidates
}

/// Locate and load the category table.
///
/// Tries in order:
/// 1. `explicit_path` (if provided)
/// 2. `PROMPT_DATA_PATH` environment variable
/// 3. `prompt_data.json` in the working directory
///
/// The first existing file is loaded; a load failure is logged and yields
/// an empty table.
pub fn load_prompt_data(explicit_path: Option<&Path>) -> PromptData {
    for path in candidate_paths(explicit_path) {
        if !path.exists() {
            log::info!("Skipping non-existent category table: {:?}", path);
            continue;
        }
        return PromptData::load_or_empty(&path);
    }

    log::warn!(
        "No category table found. Set {} or pass a path to setup_prompt_nodes().",
        PROMPT_DATA_ENV
    );
    PromptData::empty()
}

/// Load the category table and build every prompt node.
///
/// # Example
///
/// ```ignore
/// let nodes = prompt_nodes::setup_prompt_nodes(Some(Path::new("prompt_data.json")));
/// let outputs = nodes.registry().execute("HairNode", "hair-1", inputs).await?;
/// ```
pub fn setup_prompt_nodes(explicit_path: Option<&Path>) -> PromptNodes {
    let data = load_prompt_data(explicit_path);
    build_prompt_nodes(Arc::new(data))
}
