//! Workflow Validation - accumulating pre-flight checks
//!
//! The validator never returns `Err`. Problems accumulate as display
//! strings in the result so a caller sees everything wrong at once, and
//! the cost estimate is attached even when validation fails - budget
//! screens want the figure either way.
//!
//! Stage order (only the empty-workflow check aborts):
//! 1. structure: at least one node; empty and duplicate ids
//! 2. cycle check over the dependency graph
//! 3. referential integrity of every `depends_on` entry
//! 4. caller-supplied resource checks, once per node in declaration order
//! 5. monthly cost estimate, with a warning above the threshold

use rustc_hash::FxHashSet;
use serde::Serialize;
use tracing::debug;

use crate::ast::{Workflow, WorkflowNode};
use crate::dag::DependencyGraph;
use crate::error::StrataError;
use crate::estimate::{CostEstimator, PricingTable};

/// Monthly cost (USD) above which a warning is attached
const HIGH_COST_THRESHOLD: f64 = 100.0;

/// Outcome of validating one workflow. Immutable once constructed.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationResult {
    valid: bool,
    errors: Vec<String>,
    warnings: Vec<String>,
    estimated_cost: f64,
}

impl ValidationResult {
    /// `valid` is derived: a result carrying errors can never claim it.
    pub fn new(errors: Vec<String>, warnings: Vec<String>, estimated_cost: f64) -> Self {
        Self {
            valid: errors.is_empty(),
            errors,
            warnings,
            estimated_cost,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    /// Estimated monthly cost in USD, present even when invalid.
    pub fn estimated_cost(&self) -> f64 {
        self.estimated_cost
    }
}

/// Per-node callback reporting missing external resources as messages
type ResourceCheck<'a> = &'a dyn Fn(&WorkflowNode) -> Vec<String>;

/// Accumulating workflow validator over an injectable pricing schedule
#[derive(Debug, Clone, Default)]
pub struct Validator {
    cost: CostEstimator,
}

impl Validator {
    pub fn new(pricing: PricingTable) -> Self {
        Self {
            cost: CostEstimator::new(pricing),
        }
    }

    /// Validate structure, cycles, and references.
    pub fn validate(&self, workflow: &Workflow) -> ValidationResult {
        self.run(workflow, None)
    }

    /// [`validate`](Self::validate) plus a caller-supplied resource check,
    /// invoked exactly once per node in declaration order; its messages
    /// land in `errors` verbatim.
    pub fn validate_with_resources<F>(&self, workflow: &Workflow, check: F) -> ValidationResult
    where
        F: Fn(&WorkflowNode) -> Vec<String>,
    {
        self.run(workflow, Some(&check))
    }

    fn run(&self, workflow: &Workflow, check: Option<ResourceCheck<'_>>) -> ValidationResult {
        // Nothing else is worth checking against an empty workflow
        if workflow.nodes.is_empty() {
            return ValidationResult::new(
                vec![StrataError::EmptyWorkflow.to_string()],
                Vec::new(),
                0.0,
            );
        }

        let mut errors: Vec<String> = Vec::new();
        let mut warnings: Vec<String> = Vec::new();

        let mut seen: FxHashSet<&str> = FxHashSet::default();
        for (index, node) in workflow.nodes.iter().enumerate() {
            if node.id.is_empty() {
                errors.push(StrataError::EmptyNodeId { index }.to_string());
            } else if !seen.insert(node.id.as_str()) {
                errors.push(
                    StrataError::DuplicateNodeId {
                        node_id: node.id.clone(),
                    }
                    .to_string(),
                );
            }
        }

        let graph = DependencyGraph::from_workflow(workflow);
        if graph.has_cycle() {
            errors.push(StrataError::ExecutionGraphCycle.to_string());
        }

        // Every declared dependency must name a node, duplicates included
        let node_ids: FxHashSet<&str> =
            workflow.nodes.iter().map(|node| node.id.as_str()).collect();
        for node in &workflow.nodes {
            for dep in &node.depends_on {
                if !node_ids.contains(dep.as_str()) {
                    errors.push(
                        StrataError::MissingDependency {
                            node_id: node.id.clone(),
                            dep_id: dep.clone(),
                        }
                        .to_string(),
                    );
                }
            }
        }

        if let Some(check) = check {
            for node in &workflow.nodes {
                errors.extend(check(node));
            }
        }

        let estimated_cost = self.cost.estimate_monthly_cost(workflow);
        if estimated_cost > HIGH_COST_THRESHOLD {
            warnings.push(format!(
                "High estimated cost: ${estimated_cost:.2} (based on 1K executions/month)"
            ));
        }

        debug!(
            workflow = %workflow.name,
            errors = errors.len(),
            warnings = warnings.len(),
            estimated_cost,
            "workflow validated"
        );

        ValidationResult::new(errors, warnings, estimated_cost)
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;

    // ═══════════════════════════════════════════════════════════════
    // STRUCTURAL TESTS
    // ═══════════════════════════════════════════════════════════════

    #[test]
    fn test_empty_workflow_fails_fast() {
        let workflow = Workflow::new("hollow", Vec::new());
        let result = Validator::default().validate(&workflow);

        assert!(!result.is_valid());
        assert_eq!(result.errors().len(), 1);
        assert!(result.errors()[0].contains("At least one node required in workflow"));
        assert!(result.warnings().is_empty());
        assert_eq!(result.estimated_cost(), 0.0);
    }

    #[test]
    fn test_valid_workflow_passes() {
        let workflow = Workflow::from_yaml(
            r#"
nodes:
  - id: extract
    type: datasource
  - id: publish
    type: output
    depends_on: [extract]
"#,
        )
        .unwrap();
        let result = Validator::default().validate(&workflow);

        assert!(result.is_valid());
        assert!(result.errors().is_empty());
    }

    #[test]
    fn test_duplicate_and_empty_ids_accumulate() {
        let workflow = Workflow::from_yaml(
            r#"
nodes:
  - id: twin
    type: datasource
  - id: twin
    type: output
  - id: ""
    type: custom_code
"#,
        )
        .unwrap();
        let result = Validator::default().validate(&workflow);

        assert!(!result.is_valid());
        assert!(result
            .errors()
            .iter()
            .any(|e| e.contains("Duplicate node id 'twin'")));
        assert!(result.errors().iter().any(|e| e.contains("empty id")));
    }

    // ═══════════════════════════════════════════════════════════════
    // GRAPH TESTS
    // ═══════════════════════════════════════════════════════════════

    #[test]
    fn test_cycle_reported_generically() {
        let workflow = Workflow::from_yaml(
            r#"
nodes:
  - id: a
    type: custom_code
    depends_on: [b]
  - id: b
    type: custom_code
    depends_on: [a]
"#,
        )
        .unwrap();
        let result = Validator::default().validate(&workflow);

        assert!(!result.is_valid());
        assert!(result
            .errors()
            .iter()
            .any(|e| e.contains("Cycle detected in execution graph")));
    }

    #[test]
    fn test_dangling_dependency_names_both_ids() {
        let workflow = Workflow::from_yaml(
            r#"
nodes:
  - id: report
    type: output
    depends_on: [ghost]
"#,
        )
        .unwrap();
        let result = Validator::default().validate(&workflow);

        assert!(!result.is_valid());
        assert!(result
            .errors()
            .iter()
            .any(|e| e.contains("Node 'report' depends on non-existent node 'ghost'")));
    }

    // ═══════════════════════════════════════════════════════════════
    // RESOURCE CALLBACK TESTS
    // ═══════════════════════════════════════════════════════════════

    #[test]
    fn test_resource_check_runs_once_per_node_in_order() {
        let workflow = Workflow::from_yaml(
            r#"
nodes:
  - id: gamma
    type: datasource
  - id: alpha
    type: custom_code
    depends_on: [gamma]
"#,
        )
        .unwrap();

        let visited = RefCell::new(Vec::new());
        let result = Validator::default().validate_with_resources(&workflow, |node| {
            visited.borrow_mut().push(node.id.clone());
            Vec::new()
        });

        assert!(result.is_valid());
        // Declaration order, not sorted order
        assert_eq!(*visited.borrow(), vec!["gamma", "alpha"]);
    }

    #[test]
    fn test_resource_messages_appear_verbatim() {
        let workflow = Workflow::from_yaml(
            r#"
nodes:
  - id: fetch
    type: datasource
"#,
        )
        .unwrap();

        let result = Validator::default().validate_with_resources(&workflow, |node| {
            vec![format!("Datasource for node '{}' not found", node.id)]
        });

        assert!(!result.is_valid());
        assert_eq!(result.errors(), ["Datasource for node 'fetch' not found"]);
    }

    // ═══════════════════════════════════════════════════════════════
    // COST TESTS
    // ═══════════════════════════════════════════════════════════════

    #[test]
    fn test_high_cost_warns_but_stays_valid() {
        // 6 x gpt-4-turbo at defaults: (0.5*0.010 + 1.0*0.030) * 1000 = 35
        // per node, 210 total - over the threshold
        let yaml = r#"
nodes:
  - id: a
    type: llm_call
    config: { model: gpt-4-turbo }
  - id: b
    type: llm_call
    config: { model: gpt-4-turbo }
  - id: c
    type: llm_call
    config: { model: gpt-4-turbo }
  - id: d
    type: llm_call
    config: { model: gpt-4-turbo }
  - id: e
    type: llm_call
    config: { model: gpt-4-turbo }
  - id: f
    type: llm_call
    config: { model: gpt-4-turbo }
"#;
        let workflow = Workflow::from_yaml(yaml).unwrap();
        let result = Validator::default().validate(&workflow);

        assert!(result.is_valid());
        assert_eq!(result.warnings().len(), 1);
        assert!(result.warnings()[0]
            .contains("High estimated cost: $210.00 (based on 1K executions/month)"));
    }

    #[test]
    fn test_cost_present_even_when_invalid() {
        let workflow = Workflow::from_yaml(
            r#"
nodes:
  - id: ask
    type: llm_call
    depends_on: [ghost]
    config: { model: gpt-4-turbo }
"#,
        )
        .unwrap();
        let result = Validator::default().validate(&workflow);

        assert!(!result.is_valid());
        assert!((result.estimated_cost() - 35.0).abs() < 1e-9);
    }

    // ═══════════════════════════════════════════════════════════════
    // SERIALIZATION TESTS
    // ═══════════════════════════════════════════════════════════════

    #[test]
    fn test_result_serializes_contract_field_names() {
        let result = ValidationResult::new(
            vec!["broken".to_string()],
            vec!["pricey".to_string()],
            12.5,
        );
        let json = serde_json::to_value(&result).unwrap();

        assert_eq!(json["valid"], false);
        assert_eq!(json["errors"][0], "broken");
        assert_eq!(json["warnings"][0], "pricey");
        assert_eq!(json["estimated_cost"], 12.5);
    }
}
