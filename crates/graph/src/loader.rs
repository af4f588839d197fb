//! Graph file loader.
//!
//! The input is a whitespace-separated token stream: the node count and the
//! edge count, followed by one integer value per node, followed by one
//! `src dst` pair per directed edge. Line breaks are not significant.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use std::str::FromStr;

use tracing::debug;

use crate::error::GraphError;
use crate::model::{Graph, Node};

/// Load a graph from a file on disk.
pub fn load_path(path: &Path) -> Result<Graph, GraphError> {
    let file = File::open(path)?;
    load_reader(BufReader::new(file))
}

/// Load a graph from any readable source.
///
/// Malformed input is an error; there is no partial-graph recovery.
pub fn load_reader(mut reader: impl Read) -> Result<Graph, GraphError> {
    let mut input = String::new();
    reader.read_to_string(&mut input)?;
    parse(&input)
}

fn parse(input: &str) -> Result<Graph, GraphError> {
    let mut tokens = input.split_ascii_whitespace();

    let node_count: usize = next_number(&mut tokens, "node count")?;
    let edge_count: usize = next_number(&mut tokens, "edge count")?;

    let mut nodes = Vec::with_capacity(node_count);
    for _ in 0..node_count {
        let value: i64 = next_number(&mut tokens, "node value")?;
        nodes.push(Node::new(value, Vec::new()));
    }

    for _ in 0..edge_count {
        let src: usize = next_number(&mut tokens, "edge source")?;
        let dst: usize = next_number(&mut tokens, "edge target")?;
        for index in [src, dst] {
            if index >= node_count {
                return Err(GraphError::NodeOutOfRange { index, node_count });
            }
        }
        nodes[src].neighbors.push(dst);
    }

    debug!(nodes = node_count, edges = edge_count, "graph loaded");
    Ok(Graph::new(nodes))
}

fn next_number<'a, T: FromStr>(
    tokens: &mut impl Iterator<Item = &'a str>,
    what: &'static str,
) -> Result<T, GraphError> {
    let token = tokens.next().ok_or(GraphError::UnexpectedEof(what))?;
    token.parse().map_err(|_| GraphError::InvalidToken {
        what,
        token: token.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    #[test]
    fn parses_nodes_and_edges() {
        let graph = load_reader(Cursor::new("3 2\n1 2 3\n0 1\n1 2\n")).unwrap();
        assert_eq!(graph.node_count(), 3);
        assert_eq!(graph.node(0).value, 1);
        assert_eq!(graph.node(0).neighbors, vec![1]);
        assert_eq!(graph.node(1).neighbors, vec![2]);
        assert!(graph.node(2).neighbors.is_empty());
    }

    #[test]
    fn line_breaks_are_not_significant() {
        let flat = load_reader(Cursor::new("2 1 5 7 0 1")).unwrap();
        assert_eq!(flat.node_count(), 2);
        assert_eq!(flat.node(1).value, 7);
        assert_eq!(flat.node(0).neighbors, vec![1]);
    }

    #[test]
    fn accepts_negative_values() {
        let graph = load_reader(Cursor::new("2 0\n-5 -10\n")).unwrap();
        assert_eq!(graph.node(0).value, -5);
        assert_eq!(graph.node(1).value, -10);
    }

    #[test]
    fn accepts_empty_graph() {
        let graph = load_reader(Cursor::new("0 0\n")).unwrap();
        assert_eq!(graph.node_count(), 0);
    }

    #[test]
    fn truncated_input_is_an_error() {
        let err = load_reader(Cursor::new("3 1\n1 2\n")).unwrap_err();
        assert!(matches!(err, GraphError::UnexpectedEof("node value")));
    }

    #[test]
    fn non_integer_token_is_an_error() {
        let err = load_reader(Cursor::new("2 0\n1 abc\n")).unwrap_err();
        match err {
            GraphError::InvalidToken { what, token } => {
                assert_eq!(what, "node value");
                assert_eq!(token, "abc");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn edge_out_of_range_is_an_error() {
        let err = load_reader(Cursor::new("2 1\n1 2\n0 5\n")).unwrap_err();
        match err {
            GraphError::NodeOutOfRange { index, node_count } => {
                assert_eq!(index, 5);
                assert_eq!(node_count, 2);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn load_path_reads_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("graph.in");
        std::fs::write(&path, "1 0\n42\n").unwrap();

        let graph = load_path(&path).unwrap();
        assert_eq!(graph.node_count(), 1);
        assert_eq!(graph.node(0).value, 42);
    }

    #[test]
    fn load_path_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_path(&dir.path().join("missing.in")).unwrap_err();
        assert!(matches!(err, GraphError::Io(_)));
    }
}
