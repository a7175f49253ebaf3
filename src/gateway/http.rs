use crate::gateway::client::SearchGateway;
use crate::gateway::errors::GatewayError;
use crate::gateway::types::{
    CreateSessionResponse, Credential, PollResponse, SessionRequest, SessionToken,
};
use crate::shared::config::GatewayConfig;
use async_trait::async_trait;
use governor::{DefaultKeyedRateLimiter, Quota, RateLimiter};
use reqwest::header::LOCATION;
use serde::Deserialize;
use std::num::NonZeroU32;
use std::time::Duration;
use tracing::debug;

const LOG_TARGET: &str = "fare_scout::gateway::http";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// City id the provider uses for "anywhere"; not a usable destination.
const ANY_CITY: &str = "-sky";

/// RapidAPI-hosted flight search client.
pub struct HttpGateway {
    client: reqwest::Client,
    config: GatewayConfig,
    limiter: Option<DefaultKeyedRateLimiter<String>>,
}

impl HttpGateway {
    pub fn new(config: GatewayConfig) -> Result<Self, GatewayError> {
        let client = reqwest::Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        let limiter = NonZeroU32::new(config.requests_per_second)
            .map(|rate| RateLimiter::keyed(Quota::per_second(rate)));

        Ok(Self {
            client,
            config,
            limiter,
        })
    }

    async fn pace(&self, credential: &Credential) {
        if let Some(limiter) = &self.limiter {
            limiter.until_key_ready(&credential.as_str().to_string()).await;
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.config.base_url.trim_end_matches('/'), path)
    }

    pub(crate) fn session_form(&self, request: &SessionRequest<'_>) -> Vec<(&'static str, String)> {
        let mut form = vec![
            ("cabinClass", "economy".to_string()),
            ("country", self.config.country.clone()),
            ("currency", self.config.currency.clone()),
            ("locale", self.config.locale.clone()),
            ("originPlace", request.origin.to_string()),
            ("destinationPlace", request.destination.to_string()),
            ("outboundDate", request.outbound_date.to_string()),
            ("adults", "1".to_string()),
        ];
        if let Some(inbound) = request.inbound_date {
            form.push(("inboundDate", inbound.to_string()));
        }
        form
    }
}

#[async_trait]
impl SearchGateway for HttpGateway {
    async fn create_session(
        &self,
        credential: &Credential,
        request: &SessionRequest<'_>,
    ) -> Result<CreateSessionResponse, GatewayError> {
        self.pace(credential).await;

        let response = self
            .client
            .post(self.url("apiservices/pricing/v1.0"))
            .header("x-rapidapi-host", &self.config.host)
            .header("x-rapidapi-key", credential.as_str())
            .form(&self.session_form(request))
            .send()
            .await?;

        let status = response.status();
        let location = response
            .headers()
            .get(LOCATION)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);
        let body = response.text().await?;

        debug!(
            target: LOG_TARGET,
            status = status.as_u16(),
            credential = %credential.masked(),
            has_location = location.is_some(),
            "Create session answered"
        );

        Ok(CreateSessionResponse { body, location })
    }

    async fn poll_session(
        &self,
        credential: &Credential,
        token: &SessionToken,
    ) -> Result<PollResponse, GatewayError> {
        self.pace(credential).await;

        let page_size = self.config.page_size.to_string();
        let response = self
            .client
            .get(self.url(&format!("apiservices/pricing/uk2/v1.0/{token}")))
            .header("x-rapidapi-host", &self.config.host)
            .header("x-rapidapi-key", credential.as_str())
            .query(&[
                ("pageIndex", "0"),
                ("pageSize", page_size.as_str()),
                ("stops", "1"),
                ("sortType", "duration"),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(GatewayError::Status(status.as_u16()));
        }

        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }

    async fn resolve_place(
        &self,
        credential: &Credential,
        place: &str,
    ) -> Result<Option<String>, GatewayError> {
        self.pace(credential).await;

        let path = format!(
            "apiservices/autosuggest/v1.0/{}/{}/{}/",
            self.config.country, self.config.currency, self.config.locale
        );
        let response = self
            .client
            .get(self.url(&path))
            .header("x-rapidapi-host", &self.config.host)
            .header("x-rapidapi-key", credential.as_str())
            .query(&[("query", place)])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(GatewayError::Status(status.as_u16()));
        }

        let body = response.text().await?;
        let suggestions: Autosuggest = serde_json::from_str(&body)?;
        Ok(suggestions.best_place())
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct Autosuggest {
    #[serde(default)]
    places: Vec<SuggestedPlace>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct SuggestedPlace {
    place_id: String,
    #[serde(default)]
    city_id: String,
}

impl Autosuggest {
    /// Only the top suggestion counts, and only if it is a concrete city.
    pub(crate) fn best_place(self) -> Option<String> {
        let first = self.places.into_iter().next()?;
        (first.city_id != ANY_CITY).then_some(first.place_id)
    }
}
