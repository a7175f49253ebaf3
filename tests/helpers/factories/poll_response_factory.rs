use crate::gateway::{Carrier, Itinerary, Leg, PollResponse, PricingOption};
use crate::gateway::types::STATUS_COMPLETE;

pub struct PollResponseFactory {
    inner: PollResponse,
}

impl PollResponseFactory {
    pub fn new() -> Self {
        Self {
            inner: PollResponse {
                status: Some(STATUS_COMPLETE.to_string()),
                ..PollResponse::default()
            },
        }
    }

    pub fn pending() -> Self {
        Self {
            inner: PollResponse {
                status: Some("UpdatesPending".to_string()),
                ..PollResponse::default()
            },
        }
    }

    pub fn carrier(mut self, id: i64, name: &str) -> Self {
        self.inner.carriers.push(Carrier {
            id,
            name: name.to_string(),
        });
        self
    }

    pub fn direct_leg(self, id: &str, carriers: &[i64]) -> Self {
        self.leg(id, carriers, 0)
    }

    pub fn leg(mut self, id: &str, carriers: &[i64], stops: usize) -> Self {
        self.inner.legs.push(Leg {
            id: id.to_string(),
            carriers: carriers.to_vec(),
            stops: (0..stops as i64).map(|n| 10_000 + n).collect(),
        });
        self
    }

    pub fn itinerary(mut self, outbound: &str, inbound: Option<&str>, prices: &[f64]) -> Self {
        self.inner.itineraries.push(
            ItineraryFactory::new(outbound)
                .with_inbound(inbound)
                .with_prices(prices)
                .create(),
        );
        self
    }

    pub fn create(self) -> PollResponse {
        self.inner
    }
}

pub struct ItineraryFactory {
    inner: Itinerary,
}

impl ItineraryFactory {
    pub fn new(outbound: &str) -> Self {
        Self {
            inner: Itinerary {
                outbound_leg_id: outbound.to_string(),
                inbound_leg_id: None,
                pricing_options: Vec::new(),
            },
        }
    }

    pub fn with_inbound(mut self, inbound: Option<&str>) -> Self {
        self.inner.inbound_leg_id = inbound.map(str::to_string);
        self
    }

    pub fn with_prices(mut self, prices: &[f64]) -> Self {
        self.inner.pricing_options = prices
            .iter()
            .map(|price| PricingOption { price: *price })
            .collect();
        self
    }

    pub fn create(self) -> Itinerary {
        self.inner
    }
}
