use serde::Serialize;

/// Index of a node within a [`Graph`].
pub type NodeId = usize;

/// A single graph node: a payload value and the indices of its
/// outgoing neighbors, in input order.
#[derive(Debug, Clone, Serialize)]
pub struct Node {
    pub value: i64,
    pub neighbors: Vec<NodeId>,
}

impl Node {
    pub fn new(value: i64, neighbors: Vec<NodeId>) -> Self {
        Self { value, neighbors }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct GraphStats {
    pub node_count: usize,
    pub edge_count: usize,
}

/// An immutable directed graph with a fixed node set.
///
/// Node identity is positional: node `i` is `nodes[i]`. Neighbor indices
/// are validated at load time, so lookups never go out of bounds for a
/// graph produced by the loader.
#[derive(Debug, Clone)]
pub struct Graph {
    nodes: Vec<Node>,
}

impl Graph {
    pub fn new(nodes: Vec<Node>) -> Self {
        debug_assert!(
            nodes
                .iter()
                .flat_map(|n| n.neighbors.iter())
                .all(|&id| id < nodes.len()),
            "neighbor index out of range"
        );
        Self { nodes }
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id]
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn stats(&self) -> GraphStats {
        GraphStats {
            node_count: self.nodes.len(),
            edge_count: self.nodes.iter().map(|n| n.neighbors.len()).sum(),
        }
    }
}
