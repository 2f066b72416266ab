//! Cycle detection - three-color DFS with an explicit frame stack
//!
//! Colors:
//! - White: unvisited
//! - Gray: on the current DFS path
//! - Black: fully processed (all descendants visited)
//!
//! Reaching a Gray node is a back-edge and proves a cycle; the Gray path
//! suffix starting at that node is the cycle itself. The traversal is
//! driven by an explicit Enter/Exit frame stack, never recursion, so
//! depth is bounded only by memory and a 10K-node chain cannot blow the
//! call stack. Every node is tried as a root, covering disconnected
//! components; self-loops are one-node cycles.

use std::sync::Arc;

use rustc_hash::FxHashMap;

use crate::error::{Result, StrataError};

use super::DependencyGraph;

#[derive(Clone, Copy, PartialEq, Eq)]
enum Color {
    White,
    Gray,
    Black,
}

enum Frame {
    Enter(Arc<str>),
    Exit(Arc<str>),
}

impl DependencyGraph {
    /// Find one cycle, as the path of node ids closing back on its first
    /// entry (`[a, b, a]` for a two-cycle). `None` when acyclic.
    ///
    /// Traverses the inverse adjacency, so the path reads in execution
    /// direction. Deterministic: roots are tried in declaration order and
    /// edges in declaration order.
    pub fn find_cycle(&self) -> Option<Vec<Arc<str>>> {
        let mut colors: FxHashMap<Arc<str>, Color> = self
            .node_ids()
            .iter()
            .map(|id| (Arc::clone(id), Color::White))
            .collect();
        // The Gray path: every node between a root and the current frame
        let mut path: Vec<Arc<str>> = Vec::new();
        let mut stack: Vec<Frame> = Vec::new();

        for root in self.node_ids() {
            if colors.get(root.as_ref()) != Some(&Color::White) {
                continue;
            }

            stack.push(Frame::Enter(Arc::clone(root)));
            while let Some(frame) = stack.pop() {
                match frame {
                    Frame::Enter(node) => {
                        // A queued node may have been finished via another
                        // path before its frame surfaced
                        if colors.get(node.as_ref()) != Some(&Color::White) {
                            continue;
                        }
                        colors.insert(Arc::clone(&node), Color::Gray);
                        path.push(Arc::clone(&node));
                        stack.push(Frame::Exit(Arc::clone(&node)));

                        for next in self.dependents_of(&node) {
                            match colors.get(next.as_ref()) {
                                Some(Color::Gray) => {
                                    // Back-edge: the Gray path from `next`
                                    // onward is the cycle
                                    let start = path
                                        .iter()
                                        .position(|id| id.as_ref() == next.as_ref())
                                        .unwrap_or(0);
                                    let mut cycle: Vec<Arc<str>> = path[start..].to_vec();
                                    cycle.push(Arc::clone(next));
                                    return Some(cycle);
                                }
                                Some(Color::White) | None => {
                                    stack.push(Frame::Enter(Arc::clone(next)));
                                }
                                Some(Color::Black) => {} // Already processed
                            }
                        }
                    }
                    Frame::Exit(node) => {
                        path.pop();
                        colors.insert(node, Color::Black);
                    }
                }
            }
        }

        None
    }

    /// Boolean view of [`find_cycle`](Self::find_cycle).
    pub fn has_cycle(&self) -> bool {
        self.find_cycle().is_some()
    }

    /// `Result` view: `Err(CycleDetected)` carries the formatted path.
    pub fn detect_cycles(&self) -> Result<()> {
        match self.find_cycle() {
            Some(cycle) => {
                let rendered: Vec<&str> = cycle.iter().map(|id| id.as_ref()).collect();
                Err(StrataError::CycleDetected {
                    cycle: rendered.join(" → "),
                })
            }
            None => Ok(()),
        }
    }
}
