use crate::engine::errors::SearchError;
use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TripKind {
    OneWay,
    /// Inclusive stay-length range in days.
    RoundTrip { min_days: u32, max_days: u32 },
}

/// A user's search: a route plus the date matrix to scan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchQuery {
    pub origin: String,
    pub destination: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub trip: TripKind,
}

/// Dates of one matrix cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatrixCell {
    pub outbound_date: NaiveDate,
    pub inbound_date: Option<NaiveDate>,
}

impl SearchQuery {
    pub fn one_way(
        origin: impl Into<String>,
        destination: impl Into<String>,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Self, SearchError> {
        Self::validated(origin, destination, start_date, end_date, TripKind::OneWay)
    }

    pub fn round_trip(
        origin: impl Into<String>,
        destination: impl Into<String>,
        start_date: NaiveDate,
        end_date: NaiveDate,
        min_days: u32,
        max_days: u32,
    ) -> Result<Self, SearchError> {
        if min_days > max_days {
            return Err(SearchError::InvalidStay { min_days, max_days });
        }
        Self::validated(
            origin,
            destination,
            start_date,
            end_date,
            TripKind::RoundTrip { min_days, max_days },
        )
    }

    fn validated(
        origin: impl Into<String>,
        destination: impl Into<String>,
        start_date: NaiveDate,
        end_date: NaiveDate,
        trip: TripKind,
    ) -> Result<Self, SearchError> {
        if start_date > end_date {
            return Err(SearchError::InvalidDateRange {
                start: start_date,
                end: end_date,
            });
        }
        Ok(Self {
            origin: origin.into(),
            destination: destination.into(),
            start_date,
            end_date,
            trip,
        })
    }

    /// Expands the query into its date x duration matrix, day-major.
    pub fn cells(&self) -> Vec<MatrixCell> {
        let days = self
            .start_date
            .iter_days()
            .take_while(|day| *day <= self.end_date);

        match self.trip {
            TripKind::OneWay => days
                .map(|outbound_date| MatrixCell {
                    outbound_date,
                    inbound_date: None,
                })
                .collect(),
            TripKind::RoundTrip { min_days, max_days } => days
                .flat_map(|outbound_date| {
                    (min_days..=max_days).filter_map(move |stay| {
                        let inbound = outbound_date.checked_add_days(Days::new(u64::from(stay)))?;
                        Some(MatrixCell {
                            outbound_date,
                            inbound_date: Some(inbound),
                        })
                    })
                })
                .collect(),
        }
    }
}
