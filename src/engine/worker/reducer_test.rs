use crate::engine::worker::{LegCarriers, LegPartition, best_flight};
use crate::test_helpers::factories::{ItineraryFactory, PollResponseFactory};
use std::collections::BTreeSet;

fn legs(entries: &[(&str, &[&str])]) -> LegCarriers {
    entries
        .iter()
        .map(|(id, carriers)| {
            (
                id.to_string(),
                carriers.iter().map(|c| c.to_string()).collect(),
            )
        })
        .collect()
}

fn set(names: &[&str]) -> BTreeSet<String> {
    names.iter().map(|n| n.to_string()).collect()
}

#[test]
fn picks_the_minimum_price_and_unions_both_legs() {
    let legs = legs(&[("L1", &["A"]), ("L2", &["B"])]);
    let itineraries = vec![
        ItineraryFactory::new("L1")
            .with_inbound(Some("L2"))
            .with_prices(&[100.0])
            .create(),
        ItineraryFactory::new("L1")
            .with_inbound(Some("L2"))
            .with_prices(&[80.0])
            .create(),
    ];

    let best = best_flight(&itineraries, &legs).expect("qualifying itinerary");
    assert_eq!(best.price, 80.0);
    assert_eq!(best.airlines, set(&["A", "B"]));
}

#[test]
fn returns_none_when_no_itinerary_has_all_legs_in_the_map() {
    let legs = legs(&[("L1", &["A"])]);
    let itineraries = vec![
        ItineraryFactory::new("L1")
            .with_inbound(Some("L9"))
            .with_prices(&[50.0])
            .create(),
        ItineraryFactory::new("L8").with_prices(&[40.0]).create(),
    ];

    assert_eq!(best_flight(&itineraries, &legs), None);
    assert_eq!(best_flight(&[], &legs), None);
}

#[test]
fn first_seen_option_wins_a_price_tie() {
    let legs = legs(&[("L1", &["A"]), ("L2", &["B"])]);
    let itineraries = vec![
        ItineraryFactory::new("L1").with_prices(&[70.0]).create(),
        ItineraryFactory::new("L2").with_prices(&[70.0]).create(),
    ];

    let best = best_flight(&itineraries, &legs).unwrap();
    assert_eq!(best.airlines, set(&["A"]));
}

#[test]
fn considers_every_pricing_option_and_skips_nan() {
    let legs = legs(&[("L1", &["A", "A", "C"])]);
    let itineraries = vec![
        ItineraryFactory::new("L1")
            .with_prices(&[f64::NAN, 64.5, 90.0])
            .create(),
    ];

    let best = best_flight(&itineraries, &legs).unwrap();
    assert_eq!(best.price, 64.5);
    assert_eq!(best.airlines, set(&["A", "C"]));
}

#[test]
fn partition_splits_legs_by_stop_count() {
    let response = PollResponseFactory::new()
        .carrier(1, "Iberia")
        .carrier(2, "KLM")
        .direct_leg("direct-out", &[1])
        .leg("stop-out", &[1, 2], 1)
        .leg("two-stop-in", &[2], 2)
        .create();

    let partition = LegPartition::from_parts(&response.legs, &response.carriers);
    assert_eq!(partition.direct.len(), 1);
    assert_eq!(partition.direct["direct-out"], vec!["Iberia"]);
    assert_eq!(partition.with_stops.len(), 2);
    assert_eq!(partition.with_stops["stop-out"], vec!["Iberia", "KLM"]);
}

#[test]
fn unknown_carrier_ids_are_left_out() {
    let response = PollResponseFactory::new()
        .carrier(1, "Iberia")
        .direct_leg("L1", &[1, 42])
        .create();

    let partition = LegPartition::from_parts(&response.legs, &response.carriers);
    assert_eq!(partition.direct["L1"], vec!["Iberia"]);
}

#[test]
fn mixed_itinerary_belongs_to_neither_partition() {
    let response = PollResponseFactory::new()
        .carrier(1, "Iberia")
        .direct_leg("out", &[1])
        .leg("in", &[1], 1)
        .itinerary("out", Some("in"), &[30.0])
        .create();

    let partition = LegPartition::from_parts(&response.legs, &response.carriers);
    assert_eq!(best_flight(&response.itineraries, &partition.direct), None);
    assert_eq!(best_flight(&response.itineraries, &partition.with_stops), None);
}
