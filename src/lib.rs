//! Strata - deterministic workflow plan compiler
//!
//! Compile-time analysis for workflow DAGs: prove a workflow well-formed
//! and acyclic, derive a deterministic execution order, group independent
//! nodes into parallel levels, and attach cost/duration estimates for
//! budget enforcement. No execution happens here - the output is a plan,
//! not a run.
//!
//! ## Module Architecture (Layered)
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                        DOMAIN MODEL                          │
//! │  ast/       YAML → Rust types (Workflow, WorkflowNode)       │
//! └──────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌──────────────────────────────────────────────────────────────┐
//! │                       ANALYSIS LAYER                         │
//! │  dag/       Graph, cycle detection, ordering, leveling       │
//! │  estimate/  Pricing/duration schedules and estimators        │
//! └──────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌──────────────────────────────────────────────────────────────┐
//! │                     ORCHESTRATION LAYER                      │
//! │  validate   Accumulating pre-flight checks → ValidationResult│
//! │  compile    Plan assembly → ExecutionPlan                    │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Responsibilities
//!
//! | Module | Responsibility |
//! |--------|----------------|
//! | [`ast`] | YAML parsing → `Workflow`, `WorkflowNode`, typed configs |
//! | [`dag`] | Dependency graph with FxHashMap/SmallVec optimization |
//! | [`estimate`] | Injectable cost and duration schedules |
//! | [`validate`] | Structure, cycle, reference, and resource checks |
//! | [`compile`] | Deterministic order + parallel levels + duration |
//! | [`error`] | Error types with fix suggestions |
//!
//! Determinism is the load-bearing invariant: identical workflows compile
//! to byte-identical plans, with lexicographic node ids breaking every
//! tie.

// ═══════════════════════════════════════════════════════════════
// DOMAIN MODEL - YAML → Rust types
// ═══════════════════════════════════════════════════════════════
pub mod ast;

// ═══════════════════════════════════════════════════════════════
// ANALYSIS LAYER - Graph algorithms and estimators
// ═══════════════════════════════════════════════════════════════
pub mod dag;
pub mod estimate;

// ═══════════════════════════════════════════════════════════════
// ORCHESTRATION LAYER - Validation and compilation
// ═══════════════════════════════════════════════════════════════
pub mod compile;
pub mod validate;

// ═══════════════════════════════════════════════════════════════
// CROSS-CUTTING - Error handling
// ═══════════════════════════════════════════════════════════════
pub mod error;

// ═══════════════════════════════════════════════════════════════
// PUBLIC API RE-EXPORTS
// ═══════════════════════════════════════════════════════════════

// Error types
pub use error::{FixSuggestion, Result, StrataError};

// AST types (Domain Model)
pub use ast::{LlmCallConfig, NodeConfig, NodeType, Workflow, WorkflowNode};

// DAG types
pub use dag::{DepVec, DependencyGraph};

// Estimation types
pub use estimate::{CostEstimator, DurationTable, ModelPricing, PricingTable};

// Orchestration types
pub use compile::{Compiler, ExecutionPlan, ParallelGroup};
pub use validate::{ValidationResult, Validator};
