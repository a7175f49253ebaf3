use super::http::{Autosuggest, HttpGateway};
use super::types::SessionRequest;
use crate::shared::config::GatewayConfig;
use chrono::NaiveDate;

fn config() -> GatewayConfig {
    GatewayConfig {
        base_url: "https://flights.example.test/".to_string(),
        host: "flights.example.test".to_string(),
        api_keys: vec!["k1".to_string()],
        country: "ES".to_string(),
        currency: "EUR".to_string(),
        locale: "es-ES".to_string(),
        page_size: 100,
        requests_per_second: 0,
    }
}

#[test]
fn session_form_carries_inbound_date_only_for_round_trips() {
    let gateway = HttpGateway::new(config()).expect("client builds");
    let outbound = NaiveDate::from_ymd_opt(2020, 4, 5).unwrap();

    let one_way = gateway.session_form(&SessionRequest {
        origin: "SOF-sky",
        destination: "HAV-sky",
        outbound_date: outbound,
        inbound_date: None,
    });
    assert!(one_way.contains(&("outboundDate", "2020-04-05".to_string())));
    assert!(one_way.contains(&("originPlace", "SOF-sky".to_string())));
    assert!(one_way.contains(&("adults", "1".to_string())));
    assert!(!one_way.iter().any(|(key, _)| *key == "inboundDate"));

    let round_trip = gateway.session_form(&SessionRequest {
        origin: "SOF-sky",
        destination: "HAV-sky",
        outbound_date: outbound,
        inbound_date: NaiveDate::from_ymd_opt(2020, 4, 12),
    });
    assert!(round_trip.contains(&("inboundDate", "2020-04-12".to_string())));
}

#[test]
fn autosuggest_takes_first_concrete_city() {
    let found: Autosuggest = serde_json::from_str(
        r#"{"Places":[{"PlaceId":"SOF-sky","PlaceName":"Sofia","CityId":"SOFI-sky"},{"PlaceId":"X-sky","CityId":"X-sky"}]}"#,
    )
    .unwrap();
    assert_eq!(found.best_place().as_deref(), Some("SOF-sky"));

    let anywhere: Autosuggest =
        serde_json::from_str(r#"{"Places":[{"PlaceId":"BG-sky","CityId":"-sky"}]}"#).unwrap();
    assert_eq!(anywhere.best_place(), None);

    let nothing: Autosuggest = serde_json::from_str(r#"{"Places":[]}"#).unwrap();
    assert_eq!(nothing.best_place(), None);
}
