use crate::broker::message::Route;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BrokerError {
    #[error("queue {0} is closed")]
    QueueClosed(Route),
}
