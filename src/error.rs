//! Strata Error Types with Error Codes
//!
//! Error code ranges:
//! - STRATA-001-009: Workflow/input errors
//! - STRATA-010-019: Node roster errors
//! - STRATA-020-029: DAG errors
//!
//! Validation problems are accumulated as display strings inside
//! [`ValidationResult`](crate::validate::ValidationResult) rather than
//! returned as `Err`; the variants here double as the message source for
//! those strings so every problem carries a stable code.

use miette::Diagnostic;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, StrataError>;

/// Trait for errors that provide fix suggestions
pub trait FixSuggestion {
    fn fix_suggestion(&self) -> Option<&str>;
}

/// All error variants are part of the public API.
///
/// Implements both `thiserror::Error` for std error compatibility
/// and `miette::Diagnostic` for rich display in consuming tools.
#[derive(Error, Debug, Diagnostic)]
#[diagnostic(url(docsrs))]
pub enum StrataError {
    // ═══════════════════════════════════════════
    // WORKFLOW / INPUT ERRORS (001-009)
    // ═══════════════════════════════════════════
    #[error("[STRATA-001] Failed to parse workflow YAML: {0}")]
    #[diagnostic(
        code(strata::yaml_parse),
        help("Check YAML syntax: indentation and quoting")
    )]
    YamlParse(#[from] serde_yaml::Error),

    #[error("[STRATA-002] At least one node required in workflow")]
    #[diagnostic(code(strata::empty_workflow))]
    EmptyWorkflow,

    #[error("[STRATA-003] No nodes to compile")]
    #[diagnostic(code(strata::nothing_to_compile))]
    NothingToCompile,

    // ═══════════════════════════════════════════
    // NODE ROSTER ERRORS (010-019)
    // ═══════════════════════════════════════════
    #[error("[STRATA-010] Duplicate node id '{node_id}'")]
    #[diagnostic(
        code(strata::duplicate_node_id),
        help("Every node id must be unique within a workflow")
    )]
    DuplicateNodeId { node_id: String },

    #[error("[STRATA-011] Node at position {index} has an empty id")]
    #[diagnostic(code(strata::empty_node_id))]
    EmptyNodeId { index: usize },

    // ═══════════════════════════════════════════
    // DAG ERRORS (020-029)
    // ═══════════════════════════════════════════
    #[error("[STRATA-020] Cycle detected in DAG: {cycle}")]
    #[diagnostic(
        code(strata::cycle_detected),
        help("Remove one of the depends_on edges along the reported path")
    )]
    CycleDetected { cycle: String },

    /// Generic form used by the validator, which does not name cycle members.
    #[error("[STRATA-020] Cycle detected in execution graph")]
    #[diagnostic(code(strata::cycle_detected))]
    ExecutionGraphCycle,

    #[error("[STRATA-021] Node '{node_id}' depends on non-existent node '{dep_id}'")]
    #[diagnostic(
        code(strata::missing_dependency),
        help("Check node ids for typos, or add the missing node")
    )]
    MissingDependency { node_id: String, dep_id: String },

    #[error(
        "[STRATA-022] Compilation failed: cycle detected in graph. Nodes sorted: {processed}/{total}"
    )]
    #[diagnostic(code(strata::unsortable_graph))]
    UnsortableGraph { processed: usize, total: usize },
}

impl StrataError {
    /// Get the error code (e.g., "STRATA-020")
    pub fn code(&self) -> &'static str {
        match self {
            Self::YamlParse(_) => "STRATA-001",
            Self::EmptyWorkflow => "STRATA-002",
            Self::NothingToCompile => "STRATA-003",
            Self::DuplicateNodeId { .. } => "STRATA-010",
            Self::EmptyNodeId { .. } => "STRATA-011",
            Self::CycleDetected { .. } => "STRATA-020",
            Self::ExecutionGraphCycle => "STRATA-020",
            Self::MissingDependency { .. } => "STRATA-021",
            Self::UnsortableGraph { .. } => "STRATA-022",
        }
    }
}

impl FixSuggestion for StrataError {
    fn fix_suggestion(&self) -> Option<&str> {
        match self {
            Self::CycleDetected { .. } | Self::ExecutionGraphCycle => {
                Some("Remove one depends_on edge from the cycle so the graph becomes acyclic")
            }
            Self::UnsortableGraph { .. } => {
                Some("Run the validator for the full list of problems, then break the cycle")
            }
            Self::MissingDependency { .. } => {
                Some("Check node ids for typos, or add the missing node to the workflow")
            }
            Self::DuplicateNodeId { .. } => Some("Rename one of the conflicting nodes"),
            Self::EmptyWorkflow | Self::NothingToCompile => {
                Some("Add at least one node to the workflow")
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ═══════════════════════════════════════════════════════════════
    // ERROR CODE TESTS
    // ═══════════════════════════════════════════════════════════════

    #[test]
    fn test_error_codes_match_display_prefix() {
        let errors = vec![
            StrataError::EmptyWorkflow,
            StrataError::NothingToCompile,
            StrataError::DuplicateNodeId {
                node_id: "extract".into(),
            },
            StrataError::EmptyNodeId { index: 3 },
            StrataError::CycleDetected {
                cycle: "a → b → a".into(),
            },
            StrataError::ExecutionGraphCycle,
            StrataError::MissingDependency {
                node_id: "publish".into(),
                dep_id: "ghost".into(),
            },
            StrataError::UnsortableGraph {
                processed: 2,
                total: 4,
            },
        ];

        for err in errors {
            let display = err.to_string();
            assert!(
                display.starts_with(&format!("[{}]", err.code())),
                "display '{}' should start with code {}",
                display,
                err.code()
            );
        }
    }

    #[test]
    fn test_cycle_variants_share_code() {
        let rich = StrataError::CycleDetected {
            cycle: "a → b → a".into(),
        };
        let generic = StrataError::ExecutionGraphCycle;
        assert_eq!(rich.code(), generic.code());
    }

    // ═══════════════════════════════════════════════════════════════
    // MESSAGE CONTENT TESTS
    // ═══════════════════════════════════════════════════════════════

    #[test]
    fn test_missing_dependency_names_both_ids() {
        let err = StrataError::MissingDependency {
            node_id: "summarize".into(),
            dep_id: "ghost".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("'summarize'"));
        assert!(msg.contains("'ghost'"));
        assert!(msg.contains("depends on non-existent node"));
    }

    #[test]
    fn test_unsortable_graph_reports_counts() {
        let err = StrataError::UnsortableGraph {
            processed: 3,
            total: 5,
        };
        assert!(err.to_string().contains("3/5"));
    }

    #[test]
    fn test_cycle_detected_includes_path() {
        let err = StrataError::CycleDetected {
            cycle: "a → b → c → a".into(),
        };
        assert!(err.to_string().contains("a → b → c → a"));
    }

    // ═══════════════════════════════════════════════════════════════
    // FIX SUGGESTION TESTS
    // ═══════════════════════════════════════════════════════════════

    #[test]
    fn test_fix_suggestions_present_for_user_errors() {
        assert!(StrataError::ExecutionGraphCycle.fix_suggestion().is_some());
        assert!(StrataError::MissingDependency {
            node_id: "a".into(),
            dep_id: "b".into(),
        }
        .fix_suggestion()
        .is_some());
        assert!(StrataError::EmptyWorkflow.fix_suggestion().is_some());
    }
}
