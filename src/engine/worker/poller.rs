use super::reducer::{LegPartition, best_flight};
use super::retry::{Backoff, RetryPolicy, RetryState};
use crate::broker::{Broker, Consumer, Delivery, Message};
use crate::engine::errors::WorkerError;
use crate::engine::types::{PollRequest, SearchReply};
use crate::gateway::{Credential, GatewayError, PollResponse, SearchGateway, SessionToken};
use crate::shared::Sleeper;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

const LOG_TARGET: &str = "fare_scout::worker::poller";

/// Worker role that waits for a remote session to finish and reports the
/// cheapest direct and with-stops flights back to the orchestrator.
pub struct SessionPoller {
    id: usize,
    broker: Broker,
    gateway: Arc<dyn SearchGateway>,
    sleeper: Arc<dyn Sleeper>,
    policy: RetryPolicy,
}

impl SessionPoller {
    pub fn new(
        id: usize,
        broker: Broker,
        gateway: Arc<dyn SearchGateway>,
        sleeper: Arc<dyn Sleeper>,
        policy: RetryPolicy,
    ) -> Self {
        Self {
            id,
            broker,
            gateway,
            sleeper,
            policy,
        }
    }

    pub async fn run(self, consumer: Consumer) {
        info!(target: LOG_TARGET, worker_id = self.id, "Session poller started");

        while let Some(delivery) = consumer.next().await {
            if let Err(e) = self.handle(delivery).await {
                error!(target: LOG_TARGET, worker_id = self.id, error = %e, "Poll request failed");
            }
        }

        info!(target: LOG_TARGET, worker_id = self.id, "Session poller stopped");
    }

    pub async fn handle(&self, delivery: Delivery) -> Result<(), WorkerError> {
        let properties = delivery.message().properties.clone();
        let request: PollRequest = match delivery.message().decode() {
            Ok(request) => request,
            Err(e) => {
                delivery.ack();
                return Err(WorkerError::Decode(e));
            }
        };
        let Some(reply_to) = properties.reply_to else {
            delivery.ack();
            return Err(WorkerError::MissingReplyTo);
        };

        let response = self
            .poll_until_complete(&request.query.credential, &request.token)
            .await;
        let partition = LegPartition::from_parts(&response.legs, &response.carriers);
        let reply = SearchReply {
            direct: best_flight(&response.itineraries, &partition.direct),
            with_stops: best_flight(&response.itineraries, &partition.with_stops),
            query: request.query,
        };
        let credential = reply.query.credential.masked();

        let message = Message::json(properties.correlation_id.clone(), None, &reply)
            .map_err(WorkerError::Encode)?;
        self.broker.reply(&reply_to, message).await?;
        delivery.ack();

        info!(
            target: LOG_TARGET,
            worker_id = self.id,
            correlation_id = %properties.correlation_id,
            session = %request.token,
            %credential,
            "Polled session"
        );
        Ok(())
    }

    /// Polls on a fixed interval until the session reports complete.
    /// Transport errors skip the cycle. In-progress, rejected (HTTP status,
    /// rate limit) and malformed answers count toward the cooldown threshold.
    pub async fn poll_until_complete(
        &self,
        credential: &Credential,
        token: &SessionToken,
    ) -> PollResponse {
        let mut retry = RetryState::new(self.policy);

        loop {
            self.sleeper.sleep(self.policy.wait).await;

            match self.gateway.poll_session(credential, token).await {
                Ok(response) if response.is_complete() => return response,
                Ok(_) => {}
                Err(GatewayError::Transport(e)) => {
                    debug!(target: LOG_TARGET, worker_id = self.id, session = %token, error = %e, "Poll did not reach the provider");
                    continue;
                }
                Err(e) => {
                    debug!(target: LOG_TARGET, worker_id = self.id, session = %token, error = %e, "Poll rejected");
                }
            }

            if let Backoff::CoolDown(duration) = retry.record_failure() {
                warn!(
                    target: LOG_TARGET,
                    worker_id = self.id,
                    session = %token,
                    cooldown_secs = duration.as_secs(),
                    "Too many errors received, cooling down"
                );
                self.sleeper.sleep(duration).await;
            }
        }
    }
}
