//! Traversal driver: seeds node 0, lets the pool expand the frontier, waits
//! for quiescence, then drains and joins the pool.

use std::sync::Arc;

use graphsum_graph::{Graph, NodeId};
use graphsum_pool::{Task, TaskSender, ThreadPool};
use tracing::{debug, info};

use crate::state::{TraversalReport, TraversalState};

/// The traversal always starts from node 0.
const ROOT: NodeId = 0;

/// Sum every node reachable from node 0, visiting each exactly once, on a
/// pool of `threads` workers. The result is independent of `threads`.
pub fn traverse(graph: Arc<Graph>, threads: usize) -> TraversalReport {
    let state = TraversalState::new(graph.node_count());

    if graph.node_count() == 0 {
        return state.report();
    }

    debug!(nodes = graph.node_count(), threads, "starting traversal");
    let pool = ThreadPool::new(threads);
    let sender = pool.sender();

    state.seed(ROOT);
    send_node_task(&graph, &state, &sender, ROOT);

    state.wait_quiescent();
    pool.shutdown();

    let report = state.report();
    info!(
        sum = report.sum,
        nodes_visited = report.nodes_visited,
        threads,
        "traversal complete"
    );
    report
}

/// Queue the task that will process `index`. The node must already be
/// claimed (`Processing`) and counted as outstanding.
fn send_node_task(graph: &Arc<Graph>, state: &TraversalState, sender: &TaskSender, index: NodeId) {
    let graph = graph.clone();
    let state = state.clone();
    let task_sender = sender.clone();
    sender.send(Task::new(move || {
        process_node(&graph, &state, &task_sender, index);
    }));
}

/// Node action: fold the node into the shared state, then queue a task for
/// every neighbor claimed in that same critical section.
fn process_node(graph: &Arc<Graph>, state: &TraversalState, sender: &TaskSender, index: NodeId) {
    let claimed = state.complete_node(index, graph.node(index));
    for neighbor in claimed {
        send_node_task(graph, state, sender, neighbor);
    }
}
