use thiserror::Error;

/// Errors produced while loading a graph description.
#[derive(Debug, Error)]
pub enum GraphError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("unexpected end of input while reading {0}")]
    UnexpectedEof(&'static str),

    #[error("invalid integer '{token}' while reading {what}")]
    InvalidToken { what: &'static str, token: String },

    #[error("node index {index} out of range for {node_count} nodes")]
    NodeOutOfRange { index: usize, node_count: usize },
}
