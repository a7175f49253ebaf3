use crate::engine::types::{BestFlight, SearchReply, SubQuery};
use chrono::NaiveDate;
use serde::Serialize;
use std::fmt;

/// One priced cell of the matrix for a single leg-type.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlightResult {
    pub price: f64,
    pub airlines: Vec<String>,
    pub origin: String,
    pub destination: String,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
}

impl FlightResult {
    fn from_best(best: &BestFlight, query: &SubQuery) -> Self {
        Self {
            price: best.price,
            airlines: best.airlines.iter().cloned().collect(),
            origin: query.origin.clone(),
            destination: query.destination.clone(),
            start_date: query.outbound_date,
            end_date: query.inbound_date,
        }
    }

    pub fn stay_days(&self) -> Option<i64> {
        self.end_date
            .map(|end| end.signed_duration_since(self.start_date).num_days())
    }
}

impl fmt::Display for FlightResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: ", self.start_date.format("%d/%m/%Y"))?;
        if let Some(days) = self.stay_days() {
            write!(f, "{days} days ")?;
        }
        write!(f, "for {:.2}€ on {}", self.price, self.airlines.join("-"))
    }
}

/// Splits replies into price-ascending direct and with-stops lists. Equal
/// prices keep the order the replies arrived in.
pub fn build_results(replies: &[SearchReply]) -> (Vec<FlightResult>, Vec<FlightResult>) {
    let mut direct = Vec::new();
    let mut with_stops = Vec::new();

    for reply in replies {
        if let Some(best) = &reply.direct {
            direct.push(FlightResult::from_best(best, &reply.query));
        }
        if let Some(best) = &reply.with_stops {
            with_stops.push(FlightResult::from_best(best, &reply.query));
        }
    }

    // sort_by is stable
    direct.sort_by(|a, b| a.price.total_cmp(&b.price));
    with_stops.sort_by(|a, b| a.price.total_cmp(&b.price));
    (direct, with_stops)
}
