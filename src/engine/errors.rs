use crate::broker::BrokerError;
use chrono::NaiveDate;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SearchError {
    #[error("start date {start} is after end date {end}")]
    InvalidDateRange { start: NaiveDate, end: NaiveDate },

    #[error("minimum stay of {min_days} days exceeds maximum of {max_days}")]
    InvalidStay { min_days: u32, max_days: u32 },

    #[error("credential pool is empty")]
    NoCredentials,

    #[error("broker error: {0}")]
    Broker(#[from] BrokerError),

    #[error("failed to encode sub-query: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("reply queue closed with {pending} sub-queries outstanding")]
    RepliesClosed { pending: usize },
}

#[derive(Debug, Error)]
pub enum WorkerError {
    #[error("undecodable message: {0}")]
    Decode(serde_json::Error),

    #[error("failed to encode outbound message: {0}")]
    Encode(serde_json::Error),

    #[error("message has no reply destination")]
    MissingReplyTo,

    #[error("broker error: {0}")]
    Broker(#[from] BrokerError),
}
