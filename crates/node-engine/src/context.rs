//! Context key conventions for graph-flow tasks
//!
//! Tasks communicate via the shared `graph_flow::Context`, storing inputs and
//! outputs under well-defined key patterns.
//!
//! # Key Conventions
//!
//! - Inputs: `{task_id}.input.{port_name}`
//! - Outputs: `{task_id}.output.{port_name}`
//!
//! # Example
//!
//! ```ignore
//! context.set("hair_1.input.mode", "Random".to_string()).await;
//!
//! // After execution
//! let tags: Option<String> = context.get("hair_1.output.tags").await;
//! ```

/// Helper for building context keys
pub struct ContextKeys;

impl ContextKeys {
    /// Build an input key: `{task_id}.input.{port}`
    pub fn input(task_id: &str, port: &str) -> String {
        format!("{}.input.{}", task_id, port)
    }

    /// Build an output key: `{task_id}.output.{port}`
    pub fn output(task_id: &str, port: &str) -> String {
        format!("{}.output.{}", task_id, port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_keys() {
        assert_eq!(ContextKeys::input("task1", "seed"), "task1.input.seed");
        assert_eq!(ContextKeys::output("task1", "tags"), "task1.output.tags");
    }
}
