pub mod error;
pub mod loader;
pub mod model;

pub use error::GraphError;
pub use loader::{load_path, load_reader};
pub use model::{Graph, GraphStats, Node, NodeId};
