use futures::FutureExt;
use futures::future::BoxFuture;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel};
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

const LOG_TARGET: &str = "fare_scout::tasks::pool";

pub type TaskId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskStatus {
    Queued,
    Running,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TaskState {
    Queued,
    Removed,
    Running,
}

type Job = Box<dyn FnOnce() -> BoxFuture<'static, ()> + Send>;

struct QueuedTask {
    id: TaskId,
    job: Job,
}

struct PoolShared {
    next_id: AtomicU64,
    /// Live tasks only; an id leaves the map once it finished or was discarded.
    tasks: Mutex<HashMap<TaskId, TaskState>>,
}

/// Bounded background executor: one dispatcher per slot, each running a task
/// to completion before claiming the next. Removal only affects queued tasks.
pub struct TaskPool {
    shared: Arc<PoolShared>,
    tx: UnboundedSender<QueuedTask>,
    dispatchers: Vec<JoinHandle<()>>,
}

impl std::fmt::Debug for TaskPool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TaskPool")
            .field("slots", &self.dispatchers.len())
            .field("live", &self.shared.tasks.lock().len())
            .finish()
    }
}

impl TaskPool {
    pub fn new(slots: usize) -> Self {
        let slots = slots.max(1);
        let (tx, rx) = unbounded_channel();
        let rx = Arc::new(tokio::sync::Mutex::new(rx));
        let shared = Arc::new(PoolShared {
            next_id: AtomicU64::new(0),
            tasks: Mutex::new(HashMap::new()),
        });

        let dispatchers = (0..slots)
            .map(|slot| tokio::spawn(dispatch_loop(slot, Arc::clone(&rx), Arc::clone(&shared))))
            .collect();

        info!(target: LOG_TARGET, slots, "Task pool started");
        Self {
            shared,
            tx,
            dispatchers,
        }
    }

    pub fn slots(&self) -> usize {
        self.dispatchers.len()
    }

    /// Queues `task`; it is not invoked until a dispatcher claims it.
    pub fn add<F, Fut>(&self, task: F) -> TaskId
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let id = self.shared.next_id.fetch_add(1, Ordering::SeqCst);
        self.shared.tasks.lock().insert(id, TaskState::Queued);

        let job: Job = Box::new(move || task().boxed());
        if self.tx.send(QueuedTask { id, job }).is_err() {
            self.shared.tasks.lock().remove(&id);
            warn!(target: LOG_TARGET, task_id = id, "All dispatchers are gone, task dropped");
        } else {
            debug!(target: LOG_TARGET, task_id = id, "Task queued");
        }
        id
    }

    /// Marks a queued task so its dispatcher discards it. Returns false (and
    /// does nothing) when the task is running, finished or unknown.
    pub fn remove(&self, id: TaskId) -> bool {
        let mut tasks = self.shared.tasks.lock();
        match tasks.get_mut(&id) {
            Some(state @ TaskState::Queued) => {
                *state = TaskState::Removed;
                debug!(target: LOG_TARGET, task_id = id, "Task marked as removed");
                true
            }
            _ => false,
        }
    }

    pub fn status(&self, id: TaskId) -> Option<TaskStatus> {
        match self.shared.tasks.lock().get(&id) {
            Some(TaskState::Queued) => Some(TaskStatus::Queued),
            Some(TaskState::Running) => Some(TaskStatus::Running),
            Some(TaskState::Removed) | None => None,
        }
    }

    /// Stops accepting work and waits for the queue to drain.
    pub async fn shutdown(self) {
        drop(self.tx);
        for handle in self.dispatchers {
            let _ = handle.await;
        }
        info!(target: LOG_TARGET, "Task pool stopped");
    }
}

async fn dispatch_loop(
    slot: usize,
    rx: Arc<tokio::sync::Mutex<UnboundedReceiver<QueuedTask>>>,
    shared: Arc<PoolShared>,
) {
    loop {
        let next = rx.lock().await.recv().await;
        let Some(QueuedTask { id, job }) = next else {
            break;
        };

        let claimed = {
            let mut tasks = shared.tasks.lock();
            match tasks.get(&id).copied() {
                Some(TaskState::Queued) => {
                    tasks.insert(id, TaskState::Running);
                    true
                }
                Some(TaskState::Removed) => {
                    tasks.remove(&id);
                    false
                }
                _ => false,
            }
        };
        if !claimed {
            debug!(target: LOG_TARGET, slot, task_id = id, "Discarded removed task");
            continue;
        }

        debug!(target: LOG_TARGET, slot, task_id = id, "Running task");
        // The job is invoked inside the spawned task: a panic while building
        // the future must not take the dispatcher down either.
        if let Err(e) = tokio::spawn(async move { job().await }).await {
            error!(target: LOG_TARGET, slot, task_id = id, error = %e, "Task panicked");
        }
        shared.tasks.lock().remove(&id);
        debug!(target: LOG_TARGET, slot, task_id = id, "Task finished");
    }
}
