pub mod maker;
pub mod manager;
pub mod poller;
pub mod reducer;
pub mod retry;

pub use maker::SessionMaker;
pub use manager::{WorkerManager, WorkerSettings};
pub use poller::SessionPoller;
pub use reducer::{LegCarriers, LegPartition, best_flight};
pub use retry::{Backoff, RetryPolicy, RetryState};

#[cfg(test)]
mod reducer_test;
