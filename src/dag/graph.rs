//! DependencyGraph - adjacency derived from `depends_on` declarations (optimized)
//!
//! Performance notes:
//! - Arc<str> for zero-cost cloning of node IDs
//! - FxHashMap for faster hashing (non-crypto)
//! - SmallVec for stack-allocated small edge lists (0-4 items)
//!
//! Both edge directions are materialized: the forward view answers "what
//! does this node wait on", the inverse view answers "who waits on this
//! node". The forward view keeps every declared dependency id verbatim,
//! including ids that name no node, so the validator can report them; the
//! inverse view only links ids that exist.

use std::sync::Arc;

use rustc_hash::{FxHashMap, FxHashSet};
use smallvec::SmallVec;

use crate::ast::Workflow;

/// Stack-allocated edge list: most nodes have 0-4 dependencies
pub type DepVec = SmallVec<[Arc<str>; 4]>;

/// Graph of node dependencies built from `depends_on` declarations
///
/// Uses Arc<str> + FxHashMap + SmallVec. Duplicate node ids collapse to
/// their first declaration; flagging the duplicate is the validator's job.
pub struct DependencyGraph {
    /// node_id -> declared dependency ids (verbatim, may name unknown ids)
    dependencies: FxHashMap<Arc<str>, DepVec>,
    /// node_id -> ids of nodes that depend on it (known ids only)
    dependents: FxHashMap<Arc<str>, DepVec>,
    /// All node IDs in declaration order (for deterministic iteration)
    node_ids: Vec<Arc<str>>,
    /// Quick lookup for node existence
    node_set: FxHashSet<Arc<str>>,
}

impl DependencyGraph {
    pub fn from_workflow(workflow: &Workflow) -> Self {
        let capacity = workflow.nodes.len();
        let mut dependencies: FxHashMap<Arc<str>, DepVec> =
            FxHashMap::with_capacity_and_hasher(capacity, Default::default());
        let mut dependents: FxHashMap<Arc<str>, DepVec> =
            FxHashMap::with_capacity_and_hasher(capacity, Default::default());
        let mut node_ids: Vec<Arc<str>> = Vec::with_capacity(capacity);
        let mut node_set: FxHashSet<Arc<str>> =
            FxHashSet::with_capacity_and_hasher(capacity, Default::default());

        // Roster pass: one Arc<str> per unique id, first declaration wins
        for node in &workflow.nodes {
            if node_set.contains(node.id.as_str()) {
                continue;
            }
            let id: Arc<str> = Arc::from(node.id.as_str());
            node_ids.push(Arc::clone(&id));
            node_set.insert(Arc::clone(&id));
            dependencies.insert(Arc::clone(&id), DepVec::new());
            dependents.insert(id, DepVec::new());
        }

        // Edge pass: reuse the roster Arcs; skip duplicate declarations
        let mut seen: FxHashSet<&str> =
            FxHashSet::with_capacity_and_hasher(capacity, Default::default());
        for node in &workflow.nodes {
            if !seen.insert(node.id.as_str()) {
                continue;
            }
            let id = node_set
                .get(node.id.as_str())
                .cloned()
                .unwrap_or_else(|| Arc::from(node.id.as_str()));

            for dep in &node.depends_on {
                let dep_arc = node_set
                    .get(dep.as_str())
                    .cloned()
                    .unwrap_or_else(|| Arc::from(dep.as_str()));

                if let Some(edges) = dependencies.get_mut(&id) {
                    edges.push(Arc::clone(&dep_arc));
                }
                // Unknown ids get no inverse edge: nothing waits on a ghost
                if node_set.contains(dep.as_str()) {
                    if let Some(edges) = dependents.get_mut(&dep_arc) {
                        edges.push(Arc::clone(&id));
                    }
                }
            }
        }

        Self {
            dependencies,
            dependents,
            node_ids,
            node_set,
        }
    }

    /// All node ids in declaration order (duplicates collapsed).
    #[inline]
    pub fn node_ids(&self) -> &[Arc<str>] {
        &self.node_ids
    }

    /// Declared dependencies of a node, including unresolvable ids.
    #[inline]
    pub fn dependencies_of(&self, node_id: &str) -> &[Arc<str>] {
        static EMPTY: &[Arc<str>] = &[];
        self.dependencies
            .get(node_id)
            .map_or(EMPTY, SmallVec::as_slice)
    }

    /// Nodes that declared a dependency on `node_id`.
    #[inline]
    pub fn dependents_of(&self, node_id: &str) -> &[Arc<str>] {
        static EMPTY: &[Arc<str>] = &[];
        self.dependents
            .get(node_id)
            .map_or(EMPTY, SmallVec::as_slice)
    }

    /// Check if a node exists
    #[inline]
    pub fn contains(&self, node_id: &str) -> bool {
        self.node_set.contains(node_id)
    }

    /// Number of distinct nodes
    #[inline]
    pub fn len(&self) -> usize {
        self.node_ids.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.node_ids.is_empty()
    }
}
