use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Body the provider answers with when it accepted a session.
pub const ACCEPTED_BODY: &str = "{}";
pub const STATUS_COMPLETE: &str = "UpdatesComplete";

/// API key for the rate-limited provider account.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Credential(String);

impl Credential {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Printable form: only the last four characters survive.
    pub fn masked(&self) -> String {
        let visible: String = self
            .0
            .chars()
            .rev()
            .take(4)
            .collect::<Vec<_>>()
            .into_iter()
            .rev()
            .collect();
        format!("***{visible}")
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Credential").field(&self.masked()).finish()
    }
}

/// Opaque handle for one remote search job.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionToken(String);

impl SessionToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct SessionRequest<'a> {
    pub origin: &'a str,
    pub destination: &'a str,
    pub outbound_date: NaiveDate,
    pub inbound_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateSessionResponse {
    pub body: String,
    pub location: Option<String>,
}

impl CreateSessionResponse {
    pub fn accepted(location: impl Into<String>) -> Self {
        Self {
            body: ACCEPTED_BODY.to_string(),
            location: Some(location.into()),
        }
    }

    pub fn is_accepted(&self) -> bool {
        self.body == ACCEPTED_BODY
    }

    /// Last path segment of the `Location` header.
    pub fn session_token(&self) -> Option<SessionToken> {
        let location = self.location.as_deref()?;
        location
            .trim_end_matches('/')
            .rsplit('/')
            .next()
            .filter(|segment| !segment.is_empty())
            .map(SessionToken::new)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PollResponse {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub itineraries: Vec<Itinerary>,
    #[serde(default)]
    pub legs: Vec<Leg>,
    #[serde(default)]
    pub carriers: Vec<Carrier>,
}

impl PollResponse {
    pub fn is_complete(&self) -> bool {
        self.status.as_deref() == Some(STATUS_COMPLETE)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Itinerary {
    pub outbound_leg_id: String,
    #[serde(default)]
    pub inbound_leg_id: Option<String>,
    #[serde(default)]
    pub pricing_options: Vec<PricingOption>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PricingOption {
    pub price: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Leg {
    pub id: String,
    #[serde(default)]
    pub carriers: Vec<i64>,
    /// Place ids of intermediate stops
    #[serde(default)]
    pub stops: Vec<i64>,
}

impl Leg {
    pub fn stop_count(&self) -> usize {
        self.stops.len()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Carrier {
    pub id: i64,
    pub name: String,
}
