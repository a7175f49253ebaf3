use super::credentials::CredentialPool;
use super::query::SearchQuery;
use super::result::{FlightResult, build_results};
use crate::broker::{Broker, CorrelationId, Message, ReplyQueue, ReplyTo, Route};
use crate::engine::errors::SearchError;
use crate::engine::types::{SearchReply, SubQuery};
use tracing::{debug, info, warn};

const LOG_TARGET: &str = "fare_scout::orchestrator";

/// Runs one user search across the worker pipeline.
///
/// Coordinates:
/// - Expansion of the query into its date x duration matrix
/// - Round-robin credential assignment per sub-query
/// - Dispatch to the session makers, tagged with this search's correlation id
/// - Collection of the poller replies on a private reply queue
/// - Price-ordered aggregation once every sub-query has reported
///
/// The orchestrator is consumed by `execute`; its reply queue is deleted when
/// it goes out of scope.
pub struct SearchOrchestrator {
    correlation_id: CorrelationId,
    broker: Broker,
    replies: ReplyQueue,
    credentials: CredentialPool,
    query: SearchQuery,
    pending: usize,
    results: Vec<SearchReply>,
}

impl SearchOrchestrator {
    pub fn new(broker: &Broker, credentials: CredentialPool, query: SearchQuery) -> Self {
        Self {
            correlation_id: CorrelationId::generate(),
            broker: broker.clone(),
            replies: broker.declare_reply_queue(),
            credentials,
            query,
            pending: 0,
            results: Vec::new(),
        }
    }

    pub fn correlation_id(&self) -> &CorrelationId {
        &self.correlation_id
    }

    pub fn reply_to(&self) -> &ReplyTo {
        self.replies.address()
    }

    pub fn pending(&self) -> usize {
        self.pending
    }

    /// Dispatches every sub-query, waits for all replies and hands the sorted
    /// direct and with-stops lists to `on_complete`.
    pub async fn execute<F>(mut self, on_complete: F) -> Result<(), SearchError>
    where
        F: FnOnce(Vec<FlightResult>, Vec<FlightResult>),
    {
        info!(
            target: LOG_TARGET,
            correlation_id = %self.correlation_id,
            origin = %self.query.origin,
            destination = %self.query.destination,
            "Starting search"
        );

        let dispatched = self.dispatch().await?;
        info!(target: LOG_TARGET, correlation_id = %self.correlation_id, dispatched, "Sub-queries dispatched");

        while self.pending > 0 {
            let Some(message) = self.replies.recv().await else {
                return Err(SearchError::RepliesClosed {
                    pending: self.pending,
                });
            };
            self.handle_reply(&message);
        }

        let (direct, with_stops) = build_results(&self.results);
        info!(
            target: LOG_TARGET,
            correlation_id = %self.correlation_id,
            direct = direct.len(),
            with_stops = with_stops.len(),
            "Search complete"
        );
        on_complete(direct, with_stops);
        Ok(())
    }

    /// Publishes one message per matrix cell. Returns the number dispatched.
    pub(crate) async fn dispatch(&mut self) -> Result<usize, SearchError> {
        let reply_to = self.replies.address().clone();
        let mut dispatched = 0;

        for cell in self.query.cells() {
            let sub_query = SubQuery {
                origin: self.query.origin.clone(),
                destination: self.query.destination.clone(),
                outbound_date: cell.outbound_date,
                inbound_date: cell.inbound_date,
                credential: self.credentials.assign(self.pending).clone(),
            };
            debug!(
                target: LOG_TARGET,
                correlation_id = %self.correlation_id,
                outbound = %sub_query.outbound_date,
                inbound = ?sub_query.inbound_date,
                credential = %sub_query.credential.masked(),
                "Dispatching sub-query"
            );

            let message = Message::json(
                self.correlation_id.clone(),
                Some(reply_to.clone()),
                &sub_query,
            )?;
            self.broker.publish(Route::SearchRequest, message).await?;
            self.pending += 1;
            dispatched += 1;
        }

        Ok(dispatched)
    }

    /// Folds one inbound reply. Returns whether it counted toward completion.
    pub(crate) fn handle_reply(&mut self, message: &Message) -> bool {
        if message.correlation_id() != &self.correlation_id {
            debug!(
                target: LOG_TARGET,
                expected = %self.correlation_id,
                received = %message.correlation_id(),
                "Ignoring reply for another search"
            );
            return false;
        }

        if self.pending == 0 {
            warn!(target: LOG_TARGET, correlation_id = %self.correlation_id, "Reply after completion ignored");
            return false;
        }
        self.pending -= 1;

        match message.decode::<SearchReply>() {
            Ok(reply) => self.results.push(reply),
            Err(e) => {
                warn!(
                    target: LOG_TARGET,
                    correlation_id = %self.correlation_id,
                    error = %e,
                    "Undecodable reply counted as an empty cell"
                );
            }
        }

        debug!(target: LOG_TARGET, correlation_id = %self.correlation_id, pending = self.pending, "Reply received");
        true
    }
}
