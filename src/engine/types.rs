use crate::gateway::{Credential, SessionRequest, SessionToken};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// One (date, duration) cell of a search matrix, as sent to the session makers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubQuery {
    pub origin: String,
    pub destination: String,
    pub outbound_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inbound_date: Option<NaiveDate>,
    pub credential: Credential,
}

impl SubQuery {
    pub fn session_request(&self) -> SessionRequest<'_> {
        SessionRequest {
            origin: &self.origin,
            destination: &self.destination,
            outbound_date: self.outbound_date,
            inbound_date: self.inbound_date,
        }
    }
}

/// Maker -> poller hand-off.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PollRequest {
    pub token: SessionToken,
    pub query: SubQuery,
}

/// Cheapest price for one leg-type and the carriers flying it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BestFlight {
    pub price: f64,
    pub airlines: BTreeSet<String>,
}

/// Poller -> orchestrator outcome for one sub-query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchReply {
    pub direct: Option<BestFlight>,
    pub with_stops: Option<BestFlight>,
    pub query: SubQuery,
}
