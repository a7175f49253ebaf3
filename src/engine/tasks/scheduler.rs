use super::pool::{TaskId, TaskPool};
use crate::broker::Broker;
use crate::engine::search::{CredentialPool, FlightResult, SearchOrchestrator, SearchQuery};
use parking_lot::Mutex;
use std::collections::HashMap;
use tracing::{error, info};

const LOG_TARGET: &str = "fare_scout::tasks::scheduler";

/// Identifies whoever asked for a search (a chat user, a CLI session...).
pub type CallerId = u64;

/// Front-end entry point: at most one pending search per caller, executed on
/// the task pool so the caller is never blocked.
#[derive(Debug)]
pub struct SearchScheduler {
    pool: TaskPool,
    broker: Broker,
    credentials: CredentialPool,
    callers: Mutex<HashMap<CallerId, TaskId>>,
}

impl SearchScheduler {
    pub fn new(pool: TaskPool, broker: Broker, credentials: CredentialPool) -> Self {
        Self {
            pool,
            broker,
            credentials,
            callers: Mutex::new(HashMap::new()),
        }
    }

    /// Queues a search for `caller`, replacing the caller's previous search if
    /// that one has not started yet.
    pub fn submit<F>(&self, caller: CallerId, query: SearchQuery, on_complete: F) -> TaskId
    where
        F: FnOnce(Vec<FlightResult>, Vec<FlightResult>) + Send + 'static,
    {
        let mut callers = self.callers.lock();
        callers.retain(|_, task_id| self.pool.status(*task_id).is_some());

        if let Some(previous) = callers.get(&caller).copied() {
            if self.pool.remove(previous) {
                info!(target: LOG_TARGET, caller, task_id = previous, "Superseded queued search");
            }
        }

        let broker = self.broker.clone();
        let credentials = self.credentials.clone();
        let task_id = self.pool.add(move || async move {
            let orchestrator = SearchOrchestrator::new(&broker, credentials, query);
            let correlation_id = orchestrator.correlation_id().clone();
            if let Err(e) = orchestrator.execute(on_complete).await {
                error!(target: LOG_TARGET, caller, %correlation_id, error = %e, "Search failed");
            }
        });

        callers.insert(caller, task_id);
        info!(target: LOG_TARGET, caller, task_id, "Search submitted");
        task_id
    }

    /// Best-effort: only a search that is still queued can be cancelled.
    pub fn cancel(&self, caller: CallerId) -> bool {
        let task_id = self.callers.lock().get(&caller).copied();
        let cancelled = task_id.is_some_and(|id| self.pool.remove(id));
        if cancelled {
            info!(target: LOG_TARGET, caller, "Queued search cancelled");
        }
        cancelled
    }

    pub fn pool(&self) -> &TaskPool {
        &self.pool
    }

    pub async fn shutdown(self) {
        self.pool.shutdown().await;
    }
}
