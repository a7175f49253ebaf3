use crate::broker::delivery::Consumer;
use crate::broker::errors::BrokerError;
use crate::broker::message::{Message, ReplyTo, Route};
use dashmap::DashMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::sync::mpsc::{
    Receiver, Sender, UnboundedReceiver, UnboundedSender, channel, unbounded_channel,
};
use tracing::{debug, info};

const LOG_TARGET: &str = "fare_scout::broker";

struct WorkQueue {
    tx: Sender<Message>,
    rx: Arc<Mutex<Receiver<Message>>>,
}

impl WorkQueue {
    fn new(capacity: usize) -> Self {
        let (tx, rx) = channel(capacity);
        Self {
            tx,
            rx: Arc::new(Mutex::new(rx)),
        }
    }
}

struct BrokerInner {
    capacity: usize,
    search_requests: WorkQueue,
    poll_requests: WorkQueue,
    reply_queues: DashMap<ReplyTo, UnboundedSender<Message>>,
}

impl BrokerInner {
    fn queue(&self, route: Route) -> &WorkQueue {
        match route {
            Route::SearchRequest => &self.search_requests,
            Route::PollRequest => &self.poll_requests,
        }
    }
}

/// In-process message broker: two shared work queues plus private reply
/// queues. Cloning hands out another handle to the same broker.
#[derive(Clone)]
pub struct Broker {
    inner: Arc<BrokerInner>,
}

impl std::fmt::Debug for Broker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Broker")
            .field("capacity", &self.inner.capacity)
            .field("reply_queues", &self.inner.reply_queues.len())
            .finish()
    }
}

impl Broker {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        info!(target: LOG_TARGET, capacity, "Broker initialized");
        Self {
            inner: Arc::new(BrokerInner {
                capacity,
                search_requests: WorkQueue::new(capacity),
                poll_requests: WorkQueue::new(capacity),
                reply_queues: DashMap::new(),
            }),
        }
    }

    pub async fn publish(&self, route: Route, message: Message) -> Result<(), BrokerError> {
        debug!(
            target: LOG_TARGET,
            %route,
            correlation_id = %message.properties.correlation_id,
            "Publishing message"
        );
        self.inner
            .queue(route)
            .tx
            .send(message)
            .await
            .map_err(|_| BrokerError::QueueClosed(route))
    }

    /// Delivers directly to a reply queue. Nobody listening on `to` means the
    /// message is left unconsumed, which is not an error.
    pub async fn reply(&self, to: &ReplyTo, message: Message) -> Result<(), BrokerError> {
        let sender = self.inner.reply_queues.get(to).map(|entry| entry.value().clone());

        let Some(sender) = sender else {
            debug!(
                target: LOG_TARGET,
                reply_to = %to,
                correlation_id = %message.properties.correlation_id,
                "No listener on reply queue, message unconsumed"
            );
            return Ok(());
        };

        if sender.send(message).is_err() {
            debug!(target: LOG_TARGET, reply_to = %to, "Reply queue went away before delivery");
        }
        Ok(())
    }

    pub fn consumer(&self, route: Route) -> Consumer {
        let queue = self.inner.queue(route);
        Consumer::new(route, Arc::clone(&queue.rx), queue.tx.clone())
    }

    /// Declares an exclusive, unbounded reply queue; it is deleted when the
    /// returned handle is dropped.
    pub fn declare_reply_queue(&self) -> ReplyQueue {
        let address = ReplyTo::generate();
        let (tx, rx) = unbounded_channel();
        self.inner.reply_queues.insert(address.clone(), tx);
        debug!(target: LOG_TARGET, reply_to = %address, "Declared reply queue");

        ReplyQueue {
            address,
            rx,
            broker: Arc::clone(&self.inner),
        }
    }

    /// Deletes a reply queue out from under its owner. The owner drains what
    /// was already delivered, then sees the queue as closed.
    pub fn delete_reply_queue(&self, address: &ReplyTo) -> bool {
        let deleted = self.inner.reply_queues.remove(address).is_some();
        if deleted {
            info!(target: LOG_TARGET, reply_to = %address, "Reply queue deleted by broker");
        }
        deleted
    }

    /// Messages currently waiting on a work queue.
    pub fn queued(&self, route: Route) -> usize {
        let queue = self.inner.queue(route);
        self.inner.capacity - queue.tx.capacity()
    }

    pub fn reply_queue_count(&self) -> usize {
        self.inner.reply_queues.len()
    }
}

pub struct ReplyQueue {
    address: ReplyTo,
    rx: UnboundedReceiver<Message>,
    broker: Arc<BrokerInner>,
}

impl ReplyQueue {
    pub fn address(&self) -> &ReplyTo {
        &self.address
    }

    pub async fn recv(&mut self) -> Option<Message> {
        self.rx.recv().await
    }
}

impl Drop for ReplyQueue {
    fn drop(&mut self) {
        self.broker.reply_queues.remove(&self.address);
        debug!(target: LOG_TARGET, reply_to = %self.address, "Deleted reply queue");
    }
}
