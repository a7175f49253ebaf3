use crate::broker::message::{Message, Route};
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::sync::mpsc::{Receiver, Sender};
use tokio::sync::mpsc::error::TrySendError;
use tracing::{debug, error};

const LOG_TARGET: &str = "fare_scout::broker";

/// Competing consumer on a work queue. Each call to `next` hands out a single
/// unacknowledged delivery.
pub struct Consumer {
    route: Route,
    rx: Arc<Mutex<Receiver<Message>>>,
    requeue: Sender<Message>,
}

impl Consumer {
    pub(crate) fn new(
        route: Route,
        rx: Arc<Mutex<Receiver<Message>>>,
        requeue: Sender<Message>,
    ) -> Self {
        Self { route, rx, requeue }
    }

    pub fn route(&self) -> Route {
        self.route
    }

    pub async fn next(&self) -> Option<Delivery> {
        let message = self.rx.lock().await.recv().await?;
        Some(Delivery {
            route: self.route,
            message,
            requeue: Some(self.requeue.clone()),
        })
    }
}

/// A message taken off a work queue. Dropping it without `ack` puts it back.
#[derive(Debug)]
pub struct Delivery {
    route: Route,
    message: Message,
    requeue: Option<Sender<Message>>,
}

impl Delivery {
    pub fn message(&self) -> &Message {
        &self.message
    }

    pub fn route(&self) -> Route {
        self.route
    }

    pub fn ack(mut self) {
        self.requeue = None;
    }
}

impl Drop for Delivery {
    fn drop(&mut self) {
        let Some(tx) = self.requeue.take() else {
            return;
        };

        let mut message = self.message.clone();
        message.properties.redelivered = true;
        debug!(
            target: LOG_TARGET,
            route = %self.route,
            correlation_id = %message.properties.correlation_id,
            "Requeueing unacknowledged delivery"
        );

        match tx.try_send(message) {
            Ok(()) => {}
            Err(TrySendError::Full(message)) => match tokio::runtime::Handle::try_current() {
                Ok(handle) => {
                    handle.spawn(async move {
                        let _ = tx.send(message).await;
                    });
                }
                Err(_) => {
                    error!(target: LOG_TARGET, route = %self.route, "Queue full and no runtime, delivery lost");
                }
            },
            Err(TrySendError::Closed(_)) => {
                debug!(target: LOG_TARGET, route = %self.route, "Queue closed, delivery dropped");
            }
        }
    }
}
