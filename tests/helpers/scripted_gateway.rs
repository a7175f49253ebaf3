use crate::gateway::types::SessionRequest;
use crate::gateway::{
    CreateSessionResponse, Credential, GatewayError, PollResponse, SearchGateway, SessionToken,
};
use crate::test_helpers::factories::PollResponseFactory;
use async_trait::async_trait;
use chrono::NaiveDate;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

type Responder = Box<dyn Fn(&SessionToken) -> PollResponse + Send + Sync>;

/// In-memory provider with scripted failures. Tokens encode the session dates
/// (see `token_for`) so responders can price each cell differently.
pub struct ScriptedGateway {
    rejections: AtomicUsize,
    transport_errors: usize,
    poll_errors: usize,
    pending_polls: usize,
    responder: Responder,
    places: HashMap<String, String>,
    create_calls: AtomicUsize,
    created: Mutex<Vec<(Credential, NaiveDate, Option<NaiveDate>)>>,
    poll_calls: Mutex<HashMap<SessionToken, usize>>,
}

impl ScriptedGateway {
    pub fn new() -> Self {
        Self {
            rejections: AtomicUsize::new(0),
            transport_errors: 0,
            poll_errors: 0,
            pending_polls: 0,
            responder: Box::new(|_| PollResponseFactory::new().create()),
            places: HashMap::new(),
            create_calls: AtomicUsize::new(0),
            created: Mutex::new(Vec::new()),
            poll_calls: Mutex::new(HashMap::new()),
        }
    }

    /// The first `n` create calls (across all sessions) are rejected.
    pub fn with_rejections(mut self, n: usize) -> Self {
        self.rejections = AtomicUsize::new(n);
        self
    }

    /// Each session's first `n` polls never reach the provider.
    pub fn with_transport_errors(mut self, n: usize) -> Self {
        self.transport_errors = n;
        self
    }

    /// Each session then has `n` polls throttled with HTTP 429.
    pub fn with_poll_errors(mut self, n: usize) -> Self {
        self.poll_errors = n;
        self
    }

    /// Each session reports in-progress for `n` polls after the errors.
    pub fn with_pending_polls(mut self, n: usize) -> Self {
        self.pending_polls = n;
        self
    }

    pub fn with_responder<F>(mut self, responder: F) -> Self
    where
        F: Fn(&SessionToken) -> PollResponse + Send + Sync + 'static,
    {
        self.responder = Box::new(responder);
        self
    }

    pub fn with_place(mut self, name: &str, place_id: &str) -> Self {
        self.places.insert(name.to_string(), place_id.to_string());
        self
    }

    pub fn token_for(outbound: NaiveDate, inbound: Option<NaiveDate>) -> SessionToken {
        match inbound {
            Some(inbound) => SessionToken::new(format!("session-{outbound}-{inbound}")),
            None => SessionToken::new(format!("session-{outbound}-oneway")),
        }
    }

    pub fn create_calls(&self) -> usize {
        self.create_calls.load(Ordering::SeqCst)
    }

    pub fn created(&self) -> Vec<(Credential, NaiveDate, Option<NaiveDate>)> {
        self.created.lock().clone()
    }

    pub fn poll_calls(&self, token: &SessionToken) -> usize {
        self.poll_calls.lock().get(token).copied().unwrap_or(0)
    }
}

#[async_trait]
impl SearchGateway for ScriptedGateway {
    async fn create_session(
        &self,
        credential: &Credential,
        request: &SessionRequest<'_>,
    ) -> Result<CreateSessionResponse, GatewayError> {
        self.create_calls.fetch_add(1, Ordering::SeqCst);

        let rejected = self
            .rejections
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if rejected {
            return Ok(CreateSessionResponse {
                body: r#"{"message":"Too many requests"}"#.to_string(),
                location: None,
            });
        }

        self.created.lock().push((
            credential.clone(),
            request.outbound_date,
            request.inbound_date,
        ));
        let token = Self::token_for(request.outbound_date, request.inbound_date);
        Ok(CreateSessionResponse::accepted(format!(
            "https://gateway.test/apiservices/pricing/uk2/v1.0/{token}"
        )))
    }

    async fn poll_session(
        &self,
        _credential: &Credential,
        token: &SessionToken,
    ) -> Result<PollResponse, GatewayError> {
        let seen = {
            let mut calls = self.poll_calls.lock();
            let count = calls.entry(token.clone()).or_insert(0);
            *count += 1;
            *count - 1
        };

        if seen < self.transport_errors {
            return Err(transport_error());
        }
        let seen = seen - self.transport_errors;
        if seen < self.poll_errors {
            return Err(GatewayError::Status(429));
        }
        if seen < self.poll_errors + self.pending_polls {
            return Ok(PollResponseFactory::pending().create());
        }
        Ok((self.responder)(token))
    }

    async fn resolve_place(
        &self,
        _credential: &Credential,
        place: &str,
    ) -> Result<Option<String>, GatewayError> {
        Ok(self.places.get(place).cloned())
    }
}

/// A real `reqwest` error without touching the network: the URL never parses.
fn transport_error() -> GatewayError {
    let err = reqwest::Client::new()
        .get("not a url")
        .build()
        .expect_err("relative URL is rejected");
    GatewayError::Transport(err)
}
