//! Shared traversal state: per-node visitation statuses, the running sum,
//! and the outstanding-units counter, all behind one lock.
//!
//! The counter tracks traversal units that are queued, executing, or about
//! to be queued. It is deliberately distinct from the pool's own
//! ready/running bookkeeping: the pool queue can be transiently empty while
//! a node's neighbors are still being claimed, so "queue empty" never means
//! "traversal finished".

use std::sync::{Arc, Condvar, Mutex, MutexGuard};

use graphsum_graph::{Node, NodeId};
use serde::Serialize;

/// Per-node visitation status. Advances only forward:
/// `NotVisited → Processing → Done`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisitStatus {
    NotVisited,
    Processing,
    Done,
}

/// Final outcome of a traversal.
#[derive(Debug, Clone, Serialize)]
pub struct TraversalReport {
    pub sum: i64,
    pub nodes_visited: usize,
}

#[derive(Debug)]
struct Inner {
    visited: Vec<VisitStatus>,
    sum: i64,
    outstanding: usize,
}

struct StateShared {
    inner: Mutex<Inner>,
    quiescent: Condvar,
}

/// Cloneable handle over the traversal's single guarded region.
#[derive(Clone)]
pub struct TraversalState {
    shared: Arc<StateShared>,
}

impl TraversalState {
    pub fn new(node_count: usize) -> Self {
        Self {
            shared: Arc::new(StateShared {
                inner: Mutex::new(Inner {
                    visited: vec![VisitStatus::NotVisited; node_count],
                    sum: 0,
                    outstanding: 0,
                }),
                quiescent: Condvar::new(),
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.shared.inner.lock().expect("traversal lock poisoned")
    }

    /// Claim the root before the seed task exists: mark it `Processing` and
    /// count one outstanding unit.
    pub fn seed(&self, root: NodeId) {
        let mut inner = self.lock();
        debug_assert_eq!(inner.outstanding, 0);
        debug_assert_eq!(inner.visited[root], VisitStatus::NotVisited);
        inner.visited[root] = VisitStatus::Processing;
        inner.outstanding = 1;
    }

    /// Complete node `index` and claim its unvisited neighbors, in one
    /// critical section: every claimed neighbor is counted *before* the
    /// node's own unit is released, so the counter cannot reach zero while
    /// an enqueue is still owed. Returns the claimed neighbors; the caller
    /// queues their tasks outside the lock.
    pub fn complete_node(&self, index: NodeId, node: &Node) -> Vec<NodeId> {
        let mut inner = self.lock();
        debug_assert_eq!(inner.visited[index], VisitStatus::Processing);

        let mut claimed = Vec::new();
        for &neighbor in &node.neighbors {
            if inner.visited[neighbor] == VisitStatus::NotVisited {
                inner.visited[neighbor] = VisitStatus::Processing;
                inner.outstanding += 1;
                claimed.push(neighbor);
            }
        }

        inner.sum += node.value;
        inner.visited[index] = VisitStatus::Done;

        inner.outstanding -= 1;
        if inner.outstanding == 0 {
            self.shared.quiescent.notify_all();
        }
        claimed
    }

    /// Block until no traversal unit is outstanding and none can ever be
    /// produced again.
    pub fn wait_quiescent(&self) {
        let _inner = self
            .shared
            .quiescent
            .wait_while(self.lock(), |inner| inner.outstanding != 0)
            .expect("traversal lock poisoned");
    }

    /// Status of a single node.
    pub fn status(&self, index: NodeId) -> VisitStatus {
        self.lock().visited[index]
    }

    pub fn report(&self) -> TraversalReport {
        let inner = self.lock();
        TraversalReport {
            sum: inner.sum,
            nodes_visited: inner
                .visited
                .iter()
                .filter(|&&s| s == VisitStatus::Done)
                .count(),
        }
    }
}

// ── Tests ────────────────────────────────────────────────────────────
