use thiserror::Error;

/// Failures talking to the remote search provider. Workers treat all of them
/// as transient.
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("provider answered with HTTP {0}")]
    Status(u16),

    #[error("malformed provider response: {0}")]
    Malformed(#[from] serde_json::Error),
}
