//! Workflow Compilation - graph to deterministic execution plan
//!
//! Compilation fails only when no plan can exist (no nodes, or a cycle
//! survives into the sort). Descriptive diagnostics are the validator's
//! job; callers wanting friendly errors validate first.
//!
//! Determinism is the contract: identical workflows compile to
//! byte-identical plans, ties broken lexicographically by node id.

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, instrument};

use crate::ast::{Workflow, WorkflowNode};
use crate::dag::DependencyGraph;
use crate::error::{Result, StrataError};
use crate::estimate::DurationTable;

/// One dependency level of a plan: nodes free to run concurrently
#[derive(Debug, Clone, Serialize)]
pub struct ParallelGroup {
    level: usize,
    nodes: Vec<Arc<str>>,
    parallel: bool,
}

impl ParallelGroup {
    /// `parallel` is derived: a group of one has nothing to parallelize.
    pub fn new(level: usize, nodes: Vec<Arc<str>>) -> Self {
        let parallel = nodes.len() > 1;
        Self {
            level,
            nodes,
            parallel,
        }
    }

    pub fn level(&self) -> usize {
        self.level
    }

    pub fn nodes(&self) -> &[Arc<str>] {
        &self.nodes
    }

    /// Advisory flag for a downstream executor, not a scheduling decision.
    pub fn is_parallel(&self) -> bool {
        self.parallel
    }
}

/// Compiled workflow: everything an executor needs, nothing mutable.
#[derive(Debug, Clone, Serialize)]
pub struct ExecutionPlan {
    nodes: Vec<Arc<WorkflowNode>>,
    execution_order: Vec<Arc<str>>,
    parallel_groups: Vec<ParallelGroup>,
    estimated_duration_ms: u64,
}

impl ExecutionPlan {
    /// The node set as authored (Arc-shared with the workflow).
    pub fn nodes(&self) -> &[Arc<WorkflowNode>] {
        &self.nodes
    }

    /// Dependency-respecting total order over all node ids.
    pub fn execution_order(&self) -> &[Arc<str>] {
        &self.execution_order
    }

    /// Dependency levels, ascending.
    pub fn parallel_groups(&self) -> &[ParallelGroup] {
        &self.parallel_groups
    }

    /// Sequential worst-case duration in milliseconds.
    pub fn estimated_duration_ms(&self) -> u64 {
        self.estimated_duration_ms
    }
}

/// Workflow compiler over an injectable duration schedule
#[derive(Debug, Clone, Default)]
pub struct Compiler {
    durations: DurationTable,
}

impl Compiler {
    pub fn new(durations: DurationTable) -> Self {
        Self { durations }
    }

    /// Compile a workflow into an execution plan.
    #[instrument(skip(self, workflow), fields(workflow = %workflow.name, nodes = workflow.nodes.len()))]
    pub fn compile(&self, workflow: &Workflow) -> Result<ExecutionPlan> {
        if workflow.nodes.is_empty() {
            return Err(StrataError::NothingToCompile);
        }

        let graph = DependencyGraph::from_workflow(workflow);
        let execution_order = graph.topological_sort()?;
        let parallel_groups: Vec<ParallelGroup> = graph
            .dependency_levels()
            .into_iter()
            .map(|(level, nodes)| ParallelGroup::new(level, nodes))
            .collect();
        let estimated_duration_ms = self.durations.estimate_total(workflow);

        debug!(
            order = execution_order.len(),
            groups = parallel_groups.len(),
            estimated_duration_ms,
            "workflow compiled"
        );

        Ok(ExecutionPlan {
            nodes: workflow.nodes.clone(),
            execution_order,
            parallel_groups,
            estimated_duration_ms,
        })
    }
}
