use crate::test_helpers::factories::PollResponseFactory;

#[test]
fn builds_complete_response_with_partitioned_legs() {
    let response = PollResponseFactory::new()
        .carrier(1, "Iberia")
        .direct_leg("L1", &[1])
        .leg("L2", &[1], 2)
        .itinerary("L1", Some("L2"), &[99.0, 120.0])
        .create();

    assert!(response.is_complete());
    assert_eq!(response.legs[0].stop_count(), 0);
    assert_eq!(response.legs[1].stop_count(), 2);
    assert_eq!(response.itineraries[0].pricing_options.len(), 2);
    assert_eq!(response.itineraries[0].inbound_leg_id.as_deref(), Some("L2"));
}

#[test]
fn pending_response_is_not_complete() {
    assert!(!PollResponseFactory::pending().create().is_complete());
}
