//! Static table of the locations shown on the map.
//!
//! Coordinates are fixed and never derived from upstream data.

use serde::Serialize;

/// A named point on the map.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Location {
    // ---
    pub name: &'static str,
    pub latitude: f64,
    pub longitude: f64,
}

impl Location {
    pub const fn new(name: &'static str, latitude: f64, longitude: f64) -> Self {
        Self {
            name,
            latitude,
            longitude,
        }
    }
}

/// Kyushu prefectural capitals plus Osaka and Tokyo, in display order.
pub const LOCATIONS: [Location; 9] = [
    Location::new("Fukuoka", 33.5904, 130.4017),
    Location::new("Saga", 33.2494, 130.2974),
    Location::new("Nagasaki", 32.7450, 129.8739),
    Location::new("Kumamoto", 32.7900, 130.7420),
    Location::new("Oita", 33.2381, 131.6119),
    Location::new("Miyazaki", 31.9110, 131.4240),
    Location::new("Kagoshima", 31.5600, 130.5580),
    Location::new("Osaka", 34.6937, 135.5023),
    Location::new("Tokyo", 35.6895, 139.6917),
];

/// Initial map centre, roughly midway between Kyushu and Tokyo.
pub const VIEW_CENTER_LATITUDE: f64 = 33.5;
pub const VIEW_CENTER_LONGITUDE: f64 = 134.5;
