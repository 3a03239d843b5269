//! Mock data and built-in tool tests.

use tierchat_runtime::{RESTAURANT_SEARCH, ToolRegistry, WEATHER_LOOKUP, data};
use wcore::Payload;

#[test]
fn weather_is_always_sunny() {
    assert_eq!(data::weather(), "Sunny");
    assert_eq!(data::weather(), data::weather());
}

#[test]
fn restaurants_are_fixed() {
    let first = data::restaurants();
    assert_eq!(first.len(), 10);
    assert_eq!(first, data::restaurants());
    assert_eq!(first[0].name, "Seoho Kimbap");
    assert!(first.iter().all(|r| (0.0..=5.0).contains(&r.rating)));
}

#[tokio::test]
async fn tools_ignore_arguments() {
    let registry = ToolRegistry::builtin();
    for args in ["", "{}", r#"{"location":"Busan"}"#, "not json"] {
        let weather = registry.call(WEATHER_LOOKUP, args).await.unwrap();
        assert_eq!(weather, Payload::Text("Sunny".into()));
    }

    let mut seen = Vec::new();
    for args in ["", r#"{"query":"sushi"}"#, r#"{"query":"picnic food"}"#] {
        let Payload::Records(records) = registry.call(RESTAURANT_SEARCH, args).await.unwrap()
        else {
            panic!("expected records");
        };
        assert_eq!(records.len(), 10);
        seen.push(records);
    }
    assert!(seen.windows(2).all(|w| w[0] == w[1]));
    assert_eq!(seen[0][7]["name"], "Kitchen Maillard");
    assert_eq!(seen[0][7]["rating"], 4.8);
}

#[test]
fn records_match_restaurants() {
    let records = data::restaurant_records().unwrap();
    assert_eq!(records.len(), 10);
    for (record, restaurant) in records.iter().zip(data::restaurants()) {
        assert_eq!(record["name"], restaurant.name.as_str());
        assert_eq!(record["location"], restaurant.location.as_str());
    }
}
