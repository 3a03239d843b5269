//! Mock data behind the weather and restaurant lookups.
//!
//! Nothing here touches the network. Both functions return the same value
//! on every call.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The weather in Seoul. Always.
pub const WEATHER: &str = "Sunny";

/// One restaurant record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Restaurant {
    pub name: String,
    pub main_menu: String,
    pub rating: f64,
    pub location: String,
}

const RESTAURANTS: [(&str, &str, f64, &str); 10] = [
    (
        "Seoho Kimbap",
        "Kimbap (kelp, beef and more)",
        4.5,
        "Bangbae-dong, Seocho-gu, Seoul",
    ),
    (
        "Owol Kimbap",
        "Kimbap (house specials like the rice thief and Owol rolls)",
        4.6,
        "Yeonhui-dong, Seodaemun-gu, Seoul",
    ),
    (
        "Ri Kimbap",
        "Premium kimbap (egg tuna, spicy nuts and more)",
        4.3,
        "Yeonhui-dong, Seodaemun-gu, Seoul",
    ),
    (
        "Picnic Day",
        "Many kinds of kimbap, inari sushi",
        4.2,
        "Sinchon-dong, Seodaemun-gu, Seoul",
    ),
    (
        "Cafe Mamas",
        "Ricotta cheese salad, panini",
        4.4,
        "City Hall Station, Jung-gu, Seoul (several branches)",
    ),
    (
        "Subway",
        "Sandwiches (customizable)",
        4.1,
        "All over Seoul (a great many)",
    ),
    (
        "Bowl Room",
        "Poke (salad bowl)",
        4.7,
        "Sinsa-dong, Gangnam-gu, Seoul",
    ),
    (
        "Kitchen Maillard",
        "Jambon-beurre sandwich, pasta",
        4.8,
        "Gongdeok-dong, Mapo-gu, Seoul",
    ),
    (
        "Lenwich",
        "Sandwiches (Lenwich, egg bacon and more)",
        4.5,
        "Seongsu-dong, Seongdong-gu, Seoul",
    ),
    (
        "Witch Kimbap",
        "Kimbap (witch, gyori and more), tteokbokki",
        4.0,
        "Cheongdam-dong, Gangnam-gu, Seoul (several branches)",
    ),
];

/// Current weather.
pub fn weather() -> String {
    WEATHER.to_owned()
}

/// Picnic-friendly restaurants, always the same ten in the same order.
pub fn restaurants() -> Vec<Restaurant> {
    RESTAURANTS
        .iter()
        .map(|&(name, main_menu, rating, location)| Restaurant {
            name: name.into(),
            main_menu: main_menu.into(),
            rating,
            location: location.into(),
        })
        .collect()
}

/// [`restaurants`] as JSON records, in the same order.
pub fn restaurant_records() -> serde_json::Result<Vec<Value>> {
    restaurants().into_iter().map(serde_json::to_value).collect()
}
