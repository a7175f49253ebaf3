use crate::engine::types::SubQuery;
use crate::gateway::Credential;
use chrono::NaiveDate;

pub struct SubQueryFactory {
    inner: SubQuery,
}

impl SubQueryFactory {
    pub fn new() -> Self {
        Self {
            inner: SubQuery {
                origin: "SOF-sky".into(),
                destination: "HAV-sky".into(),
                outbound_date: date("2020-04-05"),
                inbound_date: None,
                credential: Credential::new("test-key-0001"),
            },
        }
    }

    pub fn with_outbound(mut self, value: &str) -> Self {
        self.inner.outbound_date = date(value);
        self
    }

    pub fn with_inbound(mut self, value: &str) -> Self {
        self.inner.inbound_date = Some(date(value));
        self
    }

    pub fn with_credential(mut self, value: &str) -> Self {
        self.inner.credential = Credential::new(value);
        self
    }

    pub fn create(self) -> SubQuery {
        self.inner
    }
}

pub fn date(value: &str) -> NaiveDate {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").expect("valid YYYY-MM-DD date")
}
