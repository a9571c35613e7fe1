//! Static lookup tables for major US cities
//!
//! A fixed city-key → coordinate table (including common aliases such as
//! "nyc" and "sf") and a state → representative-city table used by the
//! summary fan-out. Lookups are exact-match only; normalization of caller
//! input happens in the location resolver.

use crate::models::Coordinate;

/// One row of the city table
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct City {
    /// Lower-case lookup key
    pub key: &'static str,
    /// Display name
    pub name: &'static str,
    pub latitude: f64,
    pub longitude: f64,
}

impl City {
    #[must_use]
    pub fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.latitude, self.longitude)
    }
}

/// Coordinates of ~50 major US cities. Alias keys ("nyc", "la", "sf")
/// share the coordinate of their full-name entry.
pub const CITY_TABLE: &[City] = &[
    City { key: "new york", name: "New York City", latitude: 40.7128, longitude: -74.0060 },
    City { key: "nyc", name: "New York City", latitude: 40.7128, longitude: -74.0060 },
    City { key: "los angeles", name: "Los Angeles", latitude: 34.0522, longitude: -118.2437 },
    City { key: "la", name: "Los Angeles", latitude: 34.0522, longitude: -118.2437 },
    City { key: "chicago", name: "Chicago", latitude: 41.8781, longitude: -87.6298 },
    City { key: "houston", name: "Houston", latitude: 29.7604, longitude: -95.3698 },
    City { key: "phoenix", name: "Phoenix", latitude: 33.4484, longitude: -112.0740 },
    City { key: "philadelphia", name: "Philadelphia", latitude: 39.9526, longitude: -75.1652 },
    City { key: "san antonio", name: "San Antonio", latitude: 29.4241, longitude: -98.4936 },
    City { key: "san diego", name: "San Diego", latitude: 32.7157, longitude: -117.1611 },
    City { key: "dallas", name: "Dallas", latitude: 32.7767, longitude: -96.7970 },
    City { key: "san jose", name: "San Jose", latitude: 37.3382, longitude: -121.8863 },
    City { key: "austin", name: "Austin", latitude: 30.2672, longitude: -97.7431 },
    City { key: "jacksonville", name: "Jacksonville", latitude: 30.3322, longitude: -81.6557 },
    City { key: "san francisco", name: "San Francisco", latitude: 37.7749, longitude: -122.4194 },
    City { key: "sf", name: "San Francisco", latitude: 37.7749, longitude: -122.4194 },
    City { key: "columbus", name: "Columbus", latitude: 39.9612, longitude: -82.9988 },
    City { key: "charlotte", name: "Charlotte", latitude: 35.2271, longitude: -80.8431 },
    City { key: "fort worth", name: "Fort Worth", latitude: 32.7555, longitude: -97.3308 },
    City { key: "indianapolis", name: "Indianapolis", latitude: 39.7684, longitude: -86.1581 },
    City { key: "seattle", name: "Seattle", latitude: 47.6062, longitude: -122.3321 },
    City { key: "denver", name: "Denver", latitude: 39.7392, longitude: -104.9903 },
    City { key: "boston", name: "Boston", latitude: 42.3601, longitude: -71.0589 },
    City { key: "el paso", name: "El Paso", latitude: 31.7619, longitude: -106.4850 },
    City { key: "detroit", name: "Detroit", latitude: 42.3314, longitude: -83.0458 },
    City { key: "nashville", name: "Nashville", latitude: 36.1627, longitude: -86.7816 },
    City { key: "portland", name: "Portland", latitude: 45.5152, longitude: -122.6784 },
    City { key: "oklahoma city", name: "Oklahoma City", latitude: 35.4676, longitude: -97.5164 },
    City { key: "las vegas", name: "Las Vegas", latitude: 36.1699, longitude: -115.1398 },
    City { key: "louisville", name: "Louisville", latitude: 38.2527, longitude: -85.7585 },
    City { key: "baltimore", name: "Baltimore", latitude: 39.2904, longitude: -76.6122 },
    City { key: "milwaukee", name: "Milwaukee", latitude: 43.0389, longitude: -87.9065 },
    City { key: "albuquerque", name: "Albuquerque", latitude: 35.0844, longitude: -106.6504 },
    City { key: "tucson", name: "Tucson", latitude: 32.2226, longitude: -110.9747 },
    City { key: "fresno", name: "Fresno", latitude: 36.7378, longitude: -119.7871 },
    City { key: "sacramento", name: "Sacramento", latitude: 38.5816, longitude: -121.4944 },
    City { key: "kansas city", name: "Kansas City", latitude: 39.0997, longitude: -94.5786 },
    City { key: "mesa", name: "Mesa", latitude: 33.4152, longitude: -111.8315 },
    City { key: "atlanta", name: "Atlanta", latitude: 33.7490, longitude: -84.3880 },
    City { key: "colorado springs", name: "Colorado Springs", latitude: 38.8339, longitude: -104.8214 },
    City { key: "raleigh", name: "Raleigh", latitude: 35.7796, longitude: -78.6382 },
    City { key: "omaha", name: "Omaha", latitude: 41.2565, longitude: -95.9345 },
    City { key: "miami", name: "Miami", latitude: 25.7617, longitude: -80.1918 },
    City { key: "long beach", name: "Long Beach", latitude: 33.7701, longitude: -118.1937 },
    City { key: "virginia beach", name: "Virginia Beach", latitude: 36.8529, longitude: -75.9780 },
    City { key: "oakland", name: "Oakland", latitude: 37.8044, longitude: -122.2711 },
    City { key: "minneapolis", name: "Minneapolis", latitude: 44.9778, longitude: -93.2650 },
    City { key: "tulsa", name: "Tulsa", latitude: 36.1540, longitude: -95.9928 },
    City { key: "tampa", name: "Tampa", latitude: 27.9506, longitude: -82.4572 },
    City { key: "arlington", name: "Arlington", latitude: 32.7357, longitude: -97.1081 },
    City { key: "new orleans", name: "New Orleans", latitude: 29.9511, longitude: -90.0715 },
];

/// Representative cities per state, canonical keys only (no aliases) so
/// the summary fan-out picks distinct cities.
pub const STATE_CITIES: &[(&str, &[&str])] = &[
    ("AZ", &["phoenix", "tucson", "mesa"]),
    ("CA", &["los angeles", "san francisco", "san diego", "san jose", "sacramento", "fresno", "long beach", "oakland"]),
    ("CO", &["denver", "colorado springs"]),
    ("FL", &["jacksonville", "miami", "tampa"]),
    ("GA", &["atlanta"]),
    ("IL", &["chicago"]),
    ("IN", &["indianapolis"]),
    ("KY", &["louisville"]),
    ("LA", &["new orleans"]),
    ("MA", &["boston"]),
    ("MD", &["baltimore"]),
    ("MI", &["detroit"]),
    ("MN", &["minneapolis"]),
    ("MO", &["kansas city"]),
    ("NC", &["charlotte", "raleigh"]),
    ("NE", &["omaha"]),
    ("NM", &["albuquerque"]),
    ("NV", &["las vegas"]),
    ("NY", &["new york"]),
    ("OH", &["columbus"]),
    ("OK", &["oklahoma city", "tulsa"]),
    ("OR", &["portland"]),
    ("PA", &["philadelphia"]),
    ("TN", &["nashville"]),
    ("TX", &["houston", "san antonio", "dallas", "austin", "fort worth", "el paso", "arlington"]),
    ("VA", &["virginia beach"]),
    ("WA", &["seattle"]),
    ("WI", &["milwaukee"]),
];

/// Exact-match lookup by lower-case key
#[must_use]
pub fn by_key(key: &str) -> Option<&'static City> {
    CITY_TABLE.iter().find(|city| city.key == key)
}

/// Representative city keys for a state code; empty when the state has no
/// entry in the table
#[must_use]
pub fn keys_for_state(state: &str) -> &'static [&'static str] {
    STATE_CITIES
        .iter()
        .find(|(code, _)| *code == state)
        .map_or(&[], |(_, keys)| *keys)
}

/// First `limit` distinct display names, used for "city not found" hints
#[must_use]
pub fn sample_names(limit: usize) -> Vec<&'static str> {
    let mut names = Vec::with_capacity(limit);
    for city in CITY_TABLE {
        if !names.contains(&city.name) {
            names.push(city.name);
            if names.len() == limit {
                break;
            }
        }
    }
    names
}
