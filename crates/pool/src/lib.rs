pub mod pool;
pub mod task;

pub use pool::{TaskSender, ThreadPool};
pub use task::Task;
