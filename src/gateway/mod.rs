pub mod client;
pub mod errors;
pub mod http;
pub mod types;

pub use client::SearchGateway;
pub use errors::GatewayError;
pub use http::HttpGateway;
pub use types::{
    Carrier, CreateSessionResponse, Credential, Itinerary, Leg, PollResponse, PricingOption,
    SessionRequest, SessionToken,
};

#[cfg(test)]
mod http_test;
