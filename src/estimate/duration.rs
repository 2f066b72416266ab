//! Duration estimation - per-kind schedule and the sequential sum
//!
//! The estimate is a sequential worst case: a plain sum of every node's
//! schedule entry, deliberately ignoring the parallelism the level
//! grouping exposes. A downstream scheduler can do better; this figure
//! only has to be stable and conservative.

use crate::ast::{NodeType, Workflow};

/// Milliseconds-per-node-kind schedule
#[derive(Debug, Clone)]
pub struct DurationTable {
    entries: Vec<(NodeType, u64)>,
    fallback_ms: u64,
}

impl DurationTable {
    pub fn new(entries: Vec<(NodeType, u64)>, fallback_ms: u64) -> Self {
        Self {
            entries,
            fallback_ms,
        }
    }

    /// Schedule entry for one node kind; unknown kinds take the fallback.
    pub fn duration_for(&self, kind: &NodeType) -> u64 {
        self.entries
            .iter()
            .find(|(entry, _)| entry == kind)
            .map_or(self.fallback_ms, |(_, ms)| *ms)
    }

    /// Sequential total over every node in the workflow.
    pub fn estimate_total(&self, workflow: &Workflow) -> u64 {
        workflow
            .nodes
            .iter()
            .map(|node| self.duration_for(&node.kind))
            .sum()
    }
}

impl Default for DurationTable {
    fn default() -> Self {
        Self::new(
            vec![
                (NodeType::Datasource, 200),
                (NodeType::LlmCall, 2000),
                (NodeType::CustomCode, 100),
                (NodeType::Conditional, 5),
                (NodeType::Loop, 500),
                (NodeType::Output, 50),
            ],
            100,
        )
    }
}

#[cfg(test)]
mod tests {
    use crate::ast::{NodeType, Workflow, WorkflowNode};

    use super::*;

    #[test]
    fn test_standard_schedule() {
        let table = DurationTable::default();
        assert_eq!(table.duration_for(&NodeType::Datasource), 200);
        assert_eq!(table.duration_for(&NodeType::LlmCall), 2000);
        assert_eq!(table.duration_for(&NodeType::CustomCode), 100);
        assert_eq!(table.duration_for(&NodeType::Conditional), 5);
        assert_eq!(table.duration_for(&NodeType::Loop), 500);
        assert_eq!(table.duration_for(&NodeType::Output), 50);
    }

    #[test]
    fn test_unknown_kind_takes_fallback() {
        let table = DurationTable::default();
        assert_eq!(
            table.duration_for(&NodeType::Other("quantum_sampler".into())),
            100
        );
    }

    #[test]
    fn test_total_is_plain_sum() {
        let workflow = Workflow::new(
            "pipeline",
            vec![
                WorkflowNode::new("extract", NodeType::Datasource),
                WorkflowNode::new("summarize", NodeType::LlmCall),
                WorkflowNode::new("classify", NodeType::LlmCall),
                WorkflowNode::new("publish", NodeType::Output),
            ],
        );
        // 200 + 2000 + 2000 + 50, parallelism ignored
        assert_eq!(DurationTable::default().estimate_total(&workflow), 4250);
    }

    #[test]
    fn test_custom_schedule_injection() {
        let table = DurationTable::new(vec![(NodeType::LlmCall, 7)], 1);
        let workflow = Workflow::new(
            "tiny",
            vec![
                WorkflowNode::new("ask", NodeType::LlmCall),
                WorkflowNode::new("emit", NodeType::Output),
            ],
        );
        assert_eq!(table.estimate_total(&workflow), 8);
    }

    #[test]
    fn test_empty_workflow_is_instant() {
        let workflow = Workflow::new("hollow", Vec::new());
        assert_eq!(DurationTable::default().estimate_total(&workflow), 0);
    }
}
