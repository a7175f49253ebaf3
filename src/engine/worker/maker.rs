use super::retry::{Backoff, RetryPolicy, RetryState};
use crate::broker::{Broker, Consumer, Delivery, Message, Route};
use crate::engine::errors::WorkerError;
use crate::engine::types::{PollRequest, SubQuery};
use crate::gateway::{SearchGateway, SessionToken};
use crate::shared::Sleeper;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

const LOG_TARGET: &str = "fare_scout::worker::maker";

/// Worker role that turns a sub-query into a remote session and forwards it to
/// the pollers.
pub struct SessionMaker {
    id: usize,
    broker: Broker,
    gateway: Arc<dyn SearchGateway>,
    sleeper: Arc<dyn Sleeper>,
    policy: RetryPolicy,
}

impl SessionMaker {
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

    /// Consumes search requests one at a time until the queue goes away.
    pub async fn run(self, consumer: Consumer) {
        info!(target: LOG_TARGET, worker_id = self.id, "Session maker started");

        while let Some(delivery) = consumer.next().await {
            if let Err(e) = self.handle(delivery).await {
                error!(target: LOG_TARGET, worker_id = self.id, error = %e, "Search request failed");
            }
        }

        info!(target: LOG_TARGET, worker_id = self.id, "Session maker stopped");
    }

    /// Creates the session, forwards the poll request and only then acks.
    pub async fn handle(&self, delivery: Delivery) -> Result<(), WorkerError> {
        let properties = delivery.message().properties.clone();
        let query: SubQuery = match delivery.message().decode() {
            Ok(query) => query,
            Err(e) => {
                // Poison message: redelivery would fail the same way.
                delivery.ack();
                return Err(WorkerError::Decode(e));
            }
        };

        let token = self.create_session(&query).await;
        let credential = query.credential.masked();

        let forward = Message::json(
            properties.correlation_id.clone(),
            properties.reply_to,
            &PollRequest { token, query },
        )
        .map_err(WorkerError::Encode)?;
        self.broker.publish(Route::PollRequest, forward).await?;
        delivery.ack();

        info!(
            target: LOG_TARGET,
            worker_id = self.id,
            correlation_id = %properties.correlation_id,
            %credential,
            "Created session"
        );
        Ok(())
    }

    /// Retries until the gateway accepts; there is no upper bound.
    pub async fn create_session(&self, query: &SubQuery) -> SessionToken {
        let request = query.session_request();
        let mut retry = RetryState::new(self.policy);

        loop {
            match self.gateway.create_session(&query.credential, &request).await {
                Ok(response) if response.is_accepted() => match response.session_token() {
                    Some(token) => return token,
                    None => {
                        warn!(target: LOG_TARGET, worker_id = self.id, "Accepted session without a location");
                    }
                },
                Ok(response) => {
                    debug!(
                        target: LOG_TARGET,
                        worker_id = self.id,
                        body = %response.body,
                        "Session creation rejected"
                    );
                }
                Err(e) => {
                    debug!(target: LOG_TARGET, worker_id = self.id, error = %e, "Session creation failed");
                }
            }

            let backoff = retry.record_failure();
            if let Backoff::CoolDown(duration) = backoff {
                warn!(
                    target: LOG_TARGET,
                    worker_id = self.id,
                    credential = %query.credential.masked(),
                    cooldown_secs = duration.as_secs(),
                    "Too many errors received, cooling down"
                );
            }
            self.sleeper.sleep(backoff.duration()).await;
        }
    }
}
