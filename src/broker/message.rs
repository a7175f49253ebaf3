use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

pub const CONTENT_TYPE_JSON: &str = "application/json";

/// Binds every message of one user search together. Only compared for equality.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CorrelationId(String);

impl CorrelationId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for CorrelationId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Display for CorrelationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Address of a private reply queue.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReplyTo(String);

impl ReplyTo {
    pub(crate) fn generate() -> Self {
        Self(format!("reply-{}", Uuid::new_v4().simple()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ReplyTo {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Display for ReplyTo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Shared work queues. Replies are not a route: they are addressed by `ReplyTo`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    SearchRequest,
    PollRequest,
}

impl Route {
    pub fn name(&self) -> &'static str {
        match self {
            Route::SearchRequest => "search-request",
            Route::PollRequest => "poll-request",
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Properties {
    pub correlation_id: CorrelationId,
    pub reply_to: Option<ReplyTo>,
    pub content_type: &'static str,
    /// Set when the message went back to its queue unacknowledged.
    pub redelivered: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub properties: Properties,
    pub body: Vec<u8>,
}

impl Message {
    pub fn json<T: Serialize>(
        correlation_id: CorrelationId,
        reply_to: Option<ReplyTo>,
        payload: &T,
    ) -> Result<Self, serde_json::Error> {
        Ok(Self {
            properties: Properties {
                correlation_id,
                reply_to,
                content_type: CONTENT_TYPE_JSON,
                redelivered: false,
            },
            body: serde_json::to_vec(payload)?,
        })
    }

    pub fn decode<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_slice(&self.body)
    }

    pub fn correlation_id(&self) -> &CorrelationId {
        &self.properties.correlation_id
    }

    pub fn reply_to(&self) -> Option<&ReplyTo> {
        self.properties.reply_to.as_ref()
    }
}
