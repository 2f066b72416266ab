//! Topological ordering - Kahn's algorithm with a lexicographic tie-break
//!
//! The ready set is a min-heap over node ids, so extraction always takes
//! the lexicographically smallest ready node. That single rule makes the
//! whole pipeline deterministic: two runs over an identical workflow emit
//! byte-identical orders, independent of map iteration or declaration
//! order. Behaviorally identical to sorting the ready list before every
//! extraction, without the re-sorts.

use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::sync::Arc;

use rustc_hash::FxHashMap;

use crate::error::{Result, StrataError};

use super::DependencyGraph;

impl DependencyGraph {
    /// Produce a dependency-respecting total order over all node ids.
    ///
    /// Fails with `UnsortableGraph` when a residual cycle keeps the order
    /// short of the full roster; the error carries how far the sort got.
    pub fn topological_sort(&self) -> Result<Vec<Arc<str>>> {
        let total = self.len();

        // In-degree counts only dependencies that resolve to real nodes;
        // an edge to a ghost id can never be satisfied, so it never blocks
        let mut in_degree: FxHashMap<Arc<str>, usize> =
            FxHashMap::with_capacity_and_hasher(total, Default::default());
        for id in self.node_ids() {
            let degree = self
                .dependencies_of(id)
                .iter()
                .filter(|dep| self.contains(dep))
                .count();
            in_degree.insert(Arc::clone(id), degree);
        }

        let mut ready: BinaryHeap<Reverse<Arc<str>>> = self
            .node_ids()
            .iter()
            .filter(|id| in_degree.get(id.as_ref()) == Some(&0))
            .map(|id| Reverse(Arc::clone(id)))
            .collect();

        let mut order: Vec<Arc<str>> = Vec::with_capacity(total);
        while let Some(Reverse(node)) = ready.pop() {
            for dependent in self.dependents_of(&node) {
                if let Some(remaining) = in_degree.get_mut(dependent.as_ref()) {
                    *remaining -= 1;
                    if *remaining == 0 {
                        ready.push(Reverse(Arc::clone(dependent)));
                    }
                }
            }
            order.push(node);
        }

        if order.len() < total {
            return Err(StrataError::UnsortableGraph {
                processed: order.len(),
                total,
            });
        }

        Ok(order)
    }
}
