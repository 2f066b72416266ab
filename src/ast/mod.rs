//! AST Module - workflow types parsed from YAML
//!
//! Contains the declarative workflow structure:
//! - `workflow`: Workflow, WorkflowNode, NodeType, NodeConfig
//!
//! These types represent the "what" - static structure parsed from YAML.
//! Graph derivation lives in the `dag` module, orchestration in
//! `validate` and `compile`.

mod workflow;

// Re-export all public types
pub use workflow::{LlmCallConfig, NodeConfig, NodeType, Workflow, WorkflowNode};
