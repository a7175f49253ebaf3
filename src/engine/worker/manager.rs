use super::maker::SessionMaker;
use super::poller::SessionPoller;
use super::retry::RetryPolicy;
use crate::broker::{Broker, Route};
use crate::gateway::SearchGateway;
use crate::shared::Sleeper;
use crate::shared::config::Settings;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::info;

const LOG_TARGET: &str = "fare_scout::worker::manager";

#[derive(Debug, Clone, Copy)]
pub struct WorkerSettings {
    pub makers: usize,
    pub pollers: usize,
    pub maker_policy: RetryPolicy,
    pub poller_policy: RetryPolicy,
}

impl From<&Settings> for WorkerSettings {
    fn from(settings: &Settings) -> Self {
        Self {
            makers: settings.maker.instances,
            pollers: settings.poller.instances,
            maker_policy: settings.maker.retry_policy(),
            poller_policy: settings.poller.retry_policy(),
        }
    }
}

/// Owns the spawned maker and poller instances. Each instance consumes its
/// queue one message at a time.
#[derive(Debug)]
pub struct WorkerManager {
    makers: Vec<JoinHandle<()>>,
    pollers: Vec<JoinHandle<()>>,
}

impl WorkerManager {
    pub fn start(
        broker: &Broker,
        gateway: Arc<dyn SearchGateway>,
        sleeper: Arc<dyn Sleeper>,
        settings: WorkerSettings,
    ) -> Self {
        info!(
            target: LOG_TARGET,
            makers = settings.makers,
            pollers = settings.pollers,
            "Starting workers"
        );

        let makers = (0..settings.makers)
            .map(|id| {
                let maker = SessionMaker::new(
                    id,
                    broker.clone(),
                    Arc::clone(&gateway),
                    Arc::clone(&sleeper),
                    settings.maker_policy,
                );
                let consumer = broker.consumer(Route::SearchRequest);
                tokio::spawn(maker.run(consumer))
            })
            .collect();

        let pollers = (0..settings.pollers)
            .map(|id| {
                let poller = SessionPoller::new(
                    id,
                    broker.clone(),
                    Arc::clone(&gateway),
                    Arc::clone(&sleeper),
                    settings.poller_policy,
                );
                let consumer = broker.consumer(Route::PollRequest);
                tokio::spawn(poller.run(consumer))
            })
            .collect();

        Self { makers, pollers }
    }

    pub fn maker_count(&self) -> usize {
        self.makers.len()
    }

    pub fn poller_count(&self) -> usize {
        self.pollers.len()
    }

    /// Aborts every instance. A message being processed is not acknowledged
    /// and goes back to its queue.
    pub async fn shutdown(self) {
        let handles: Vec<JoinHandle<()>> = self.makers.into_iter().chain(self.pollers).collect();
        for handle in &handles {
            handle.abort();
        }
        for handle in handles {
            let _ = handle.await;
        }
        info!(target: LOG_TARGET, "Workers stopped");
    }
}
