//! DAG Analysis - graph derivation, cycle detection, ordering, leveling
//!
//! A workflow passes through these stages on its way to a plan:
//!
//! 1. [`DependencyGraph::from_workflow`] - adjacency in both directions
//! 2. `find_cycle` / `detect_cycles` - iterative three-color DFS
//! 3. `topological_sort` - Kahn's algorithm with a lexicographic tie-break
//! 4. `dependency_levels` - readiness frontiers for parallel grouping
//!
//! Every stage is a pure function of the graph. The graph itself is
//! rebuilt per call and never shared across calls.

mod cycle;
mod graph;
mod level;
mod topo;

pub use graph::{DepVec, DependencyGraph};
