//! Cost estimation - model pricing lookup and the two cost formulas
//!
//! Two deliberately distinct calculations:
//!
//! - [`CostEstimator::estimate_monthly_cost`]: the pre-flight budget
//!   figure. Assumes a flat input-token average per execution and a
//!   standard monthly execution volume; no safety margin, two decimals.
//! - [`CostEstimator::estimate_run_cost`]: the post-compile figure for a
//!   single run. Input tokens come from the configured prompt's literal
//!   length; a fixed safety margin covers interpolation growth and retry
//!   overhead; four decimals.
//!
//! They answer different questions (budget enforcement vs. run quoting)
//! and must not be unified.

use crate::ast::{Workflow, WorkflowNode};

/// Model assumed when an `llm_call` node does not name one
const DEFAULT_MODEL: &str = "gpt-3.5-turbo";
/// Output-token budget assumed when `max_tokens` is not configured
const DEFAULT_MAX_TOKENS: u64 = 1000;
/// Flat input-token average assumed by the monthly estimate
const MONTHLY_INPUT_TOKENS: f64 = 500.0;
/// Execution volume assumed by the monthly estimate
const MONTHLY_EXECUTIONS: f64 = 1000.0;
/// Safety margin applied by the single-run estimate
const RUN_SAFETY_MARGIN: f64 = 1.3;
/// Chars-per-token heuristic for English prompts
const CHARS_PER_TOKEN: f64 = 4.0;

/// $/1K-token rates for one model family
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModelPricing {
    pub input_per_1k: f64,
    pub output_per_1k: f64,
}

/// Ordered model pricing schedule
///
/// Lookup is a case-insensitive substring match of the configured model
/// name against the entry keys, tried in declaration order - keep more
/// specific keys ahead of more general ones. Unknown models fall back to
/// a conservative default pair.
#[derive(Debug, Clone)]
pub struct PricingTable {
    entries: Vec<(String, ModelPricing)>,
    fallback: ModelPricing,
}

impl PricingTable {
    /// Keys are lowercased once here so lookups stay allocation-light.
    pub fn new(entries: Vec<(String, ModelPricing)>, fallback: ModelPricing) -> Self {
        Self {
            entries: entries
                .into_iter()
                .map(|(key, pricing)| (key.to_lowercase(), pricing))
                .collect(),
            fallback,
        }
    }

    /// Resolve the rates for a model name.
    pub fn pricing_for(&self, model: &str) -> ModelPricing {
        let model = model.to_lowercase();
        self.entries
            .iter()
            .find(|(key, _)| model.contains(key.as_str()))
            .map_or(self.fallback, |(_, pricing)| *pricing)
    }
}

impl Default for PricingTable {
    fn default() -> Self {
        let entry = |key: &str, input: f64, output: f64| {
            (
                key.to_string(),
                ModelPricing {
                    input_per_1k: input,
                    output_per_1k: output,
                },
            )
        };
        Self::new(
            vec![
                entry("claude-3-5-sonnet", 0.003, 0.015),
                entry("claude-3-haiku", 0.00025, 0.00125),
                entry("gpt-4-turbo", 0.010, 0.030),
                entry("gpt-3.5-turbo", 0.0005, 0.0015),
                entry("mistral-large", 0.004, 0.012),
                entry("llama", 0.0, 0.0),
            ],
            ModelPricing {
                input_per_1k: 0.010,
                output_per_1k: 0.030,
            },
        )
    }
}

/// Pure cost estimator over an injectable pricing schedule
///
/// Only `llm_call` nodes contribute; every other kind is free.
#[derive(Debug, Clone, Default)]
pub struct CostEstimator {
    pricing: PricingTable,
}

impl CostEstimator {
    pub fn new(pricing: PricingTable) -> Self {
        Self { pricing }
    }

    /// Pre-flight monthly budget figure: flat input-token average per
    /// execution, scaled to the standard monthly volume. Two decimals.
    pub fn estimate_monthly_cost(&self, workflow: &Workflow) -> f64 {
        let per_execution: f64 = workflow
            .nodes
            .iter()
            .filter(|node| node.kind.is_llm_call())
            .map(|node| self.execution_cost(node, MONTHLY_INPUT_TOKENS))
            .sum();
        round_to(per_execution * MONTHLY_EXECUTIONS, 2)
    }

    /// Post-compile single-run figure: the configured prompt's length
    /// drives input tokens, inflated by the safety margin. Four decimals.
    pub fn estimate_run_cost(&self, workflow: &Workflow) -> f64 {
        let base: f64 = workflow
            .nodes
            .iter()
            .filter(|node| node.kind.is_llm_call())
            .map(|node| {
                let prompt = node
                    .config
                    .as_llm_call()
                    .and_then(|config| config.prompt.as_deref())
                    .unwrap_or("");
                let input_tokens = prompt.chars().count() as f64 / CHARS_PER_TOKEN;
                self.execution_cost(node, input_tokens)
            })
            .sum();
        round_to(base * RUN_SAFETY_MARGIN, 4)
    }

    /// One execution of one node at the given input size.
    fn execution_cost(&self, node: &WorkflowNode, input_tokens: f64) -> f64 {
        let config = node.config.as_llm_call();
        let model = config
            .and_then(|config| config.model.as_deref())
            .unwrap_or(DEFAULT_MODEL);
        let max_tokens = config
            .and_then(|config| config.max_tokens)
            .unwrap_or(DEFAULT_MAX_TOKENS) as f64;

        let pricing = self.pricing.pricing_for(model);
        (input_tokens / 1000.0) * pricing.input_per_1k
            + (max_tokens / 1000.0) * pricing.output_per_1k
    }
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}
