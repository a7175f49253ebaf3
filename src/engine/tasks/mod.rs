pub mod pool;
pub mod scheduler;

pub use pool::{TaskId, TaskPool, TaskStatus};
pub use scheduler::{CallerId, SearchScheduler};
