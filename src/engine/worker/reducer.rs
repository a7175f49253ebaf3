use crate::engine::types::BestFlight;
use crate::gateway::{Carrier, Itinerary, Leg};
use std::collections::{BTreeSet, HashMap};
use tracing::debug;

const LOG_TARGET: &str = "fare_scout::worker::reducer";

/// Leg id -> carrier names in the leg's own order.
pub type LegCarriers = HashMap<String, Vec<String>>;

/// Legs of one completed session split by stop count.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct LegPartition {
    pub direct: LegCarriers,
    pub with_stops: LegCarriers,
}

impl LegPartition {
    /// Carrier ids missing from `carriers` are left out of the leg's names.
    pub fn from_parts(legs: &[Leg], carriers: &[Carrier]) -> Self {
        let names: HashMap<i64, &str> = carriers
            .iter()
            .map(|carrier| (carrier.id, carrier.name.as_str()))
            .collect();

        let mut partition = Self::default();
        for leg in legs {
            let flights: Vec<String> = leg
                .carriers
                .iter()
                .filter_map(|id| match names.get(id) {
                    Some(name) => Some((*name).to_string()),
                    None => {
                        debug!(target: LOG_TARGET, leg = %leg.id, carrier_id = id, "Unknown carrier id");
                        None
                    }
                })
                .collect();

            if leg.stop_count() == 0 {
                partition.direct.insert(leg.id.clone(), flights);
            } else {
                partition.with_stops.insert(leg.id.clone(), flights);
            }
        }
        partition
    }
}

/// Cheapest pricing option among itineraries whose legs are all in `legs`.
///
/// First-seen wins on equal prices. Returns `None` when no itinerary qualifies.
pub fn best_flight(itineraries: &[Itinerary], legs: &LegCarriers) -> Option<BestFlight> {
    let mut best: Option<BestFlight> = None;

    for itinerary in itineraries {
        let Some(outbound) = legs.get(&itinerary.outbound_leg_id) else {
            continue;
        };
        let inbound = match &itinerary.inbound_leg_id {
            Some(id) => match legs.get(id) {
                Some(carriers) => Some(carriers),
                None => continue,
            },
            None => None,
        };

        for option in &itinerary.pricing_options {
            if option.price.is_nan() {
                continue;
            }
            let improves = best.as_ref().is_none_or(|b| option.price < b.price);
            if improves {
                let mut airlines: BTreeSet<String> = outbound.iter().cloned().collect();
                if let Some(inbound) = inbound {
                    airlines.extend(inbound.iter().cloned());
                }
                best = Some(BestFlight {
                    price: option.price,
                    airlines,
                });
            }
        }
    }

    best
}
