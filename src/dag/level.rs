//! Dependency leveling - readiness frontiers for parallel grouping
//!
//! A node's level is one plus the deepest level among its dependencies;
//! dependency-free nodes sit at level 0. Nodes are leveled only once all
//! of their dependencies are leveled (the same readiness rule Kahn's
//! algorithm uses), never on first discovery - discovery order assigns a
//! skewed diamond's sink the level of whichever parent found it first,
//! which is wrong whenever the parents sit at different depths.
//!
//! Nodes stuck on a cycle never become ready and are simply absent from
//! the result; turning that into an error is the sorter's job.

use std::collections::BTreeMap;
use std::sync::Arc;

use rustc_hash::FxHashMap;

use super::DependencyGraph;

impl DependencyGraph {
    /// Group node ids by dependency depth: level → ascending-sorted ids.
    pub fn dependency_levels(&self) -> BTreeMap<usize, Vec<Arc<str>>> {
        let total = self.len();

        let mut remaining: FxHashMap<Arc<str>, usize> =
            FxHashMap::with_capacity_and_hasher(total, Default::default());
        for id in self.node_ids() {
            let degree = self
                .dependencies_of(id)
                .iter()
                .filter(|dep| self.contains(dep))
                .count();
            remaining.insert(Arc::clone(id), degree);
        }

        let mut level_of: FxHashMap<Arc<str>, usize> =
            FxHashMap::with_capacity_and_hasher(total, Default::default());
        let mut levels: BTreeMap<usize, Vec<Arc<str>>> = BTreeMap::new();

        let mut frontier: Vec<Arc<str>> = self
            .node_ids()
            .iter()
            .filter(|id| remaining.get(id.as_ref()) == Some(&0))
            .cloned()
            .collect();

        while !frontier.is_empty() {
            let mut next: Vec<Arc<str>> = Vec::new();

            for node in &frontier {
                // All real dependencies are leveled by the time a node
                // becomes ready; ghosts contribute nothing
                let level = self
                    .dependencies_of(node)
                    .iter()
                    .filter_map(|dep| level_of.get(dep.as_ref()))
                    .max()
                    .map_or(0, |deepest| deepest + 1);

                level_of.insert(Arc::clone(node), level);
                levels.entry(level).or_default().push(Arc::clone(node));

                for dependent in self.dependents_of(node) {
                    if let Some(count) = remaining.get_mut(dependent.as_ref()) {
                        *count -= 1;
                        if *count == 0 {
                            next.push(Arc::clone(dependent));
                        }
                    }
                }
            }

            frontier = next;
        }

        for ids in levels.values_mut() {
            ids.sort_unstable();
        }

        levels
    }
}
