use crate::gateway::errors::GatewayError;
use crate::gateway::types::{
    CreateSessionResponse, Credential, PollResponse, SessionRequest, SessionToken,
};
use async_trait::async_trait;

/// Remote flight-search provider: asynchronous sessions that are created once
/// and polled until complete.
#[async_trait]
pub trait SearchGateway: Send + Sync {
    async fn create_session(
        &self,
        credential: &Credential,
        request: &SessionRequest<'_>,
    ) -> Result<CreateSessionResponse, GatewayError>;

    async fn poll_session(
        &self,
        credential: &Credential,
        token: &SessionToken,
    ) -> Result<PollResponse, GatewayError>;

    /// Maps a free-form place name to the provider's place id.
    async fn resolve_place(
        &self,
        credential: &Credential,
        place: &str,
    ) -> Result<Option<String>, GatewayError>;
}
