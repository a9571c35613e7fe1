//! Data models for weather information and API responses
//!
//! Contains the internal domain types and, in the nested [`nws`] module, the
//! wire shapes of the api.weather.gov responses. Upstream payloads are only
//! loosely specified, so every wire field is optional; consumers must check
//! presence explicitly and degrade to an "Unknown" rendering, never assume a
//! field exists.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Geographic coordinate in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    /// Latitude in [-90, 90]
    pub latitude: f64,
    /// Longitude in [-180, 180]
    pub longitude: f64,
}

impl Coordinate {
    #[must_use]
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// Forecast grid cell metadata derived from a point lookup.
///
/// `grid_x` / `grid_y` can legitimately be 0; they are only missing when the
/// upstream response omits them.
#[derive(Debug, Clone, PartialEq)]
pub struct GridReference {
    pub grid_id: String,
    pub grid_x: i64,
    pub grid_y: i64,
    /// Upstream-provided URL for the forecast of this grid cell
    pub forecast_url: String,
}

/// Alert severity levels, ordered by rank for sorting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertSeverity {
    Severe,
    Moderate,
    Minor,
    Unknown,
}

impl AlertSeverity {
    /// Parse the upstream severity string; anything unrecognized is `Unknown`
    #[must_use]
    pub fn parse(raw: Option<&str>) -> Self {
        match raw {
            Some("Severe") => Self::Severe,
            Some("Moderate") => Self::Moderate,
            Some("Minor") => Self::Minor,
            _ => Self::Unknown,
        }
    }

    /// Numeric rank used for descending severity ordering
    #[must_use]
    pub fn rank(self) -> u8 {
        match self {
            Self::Severe => 3,
            Self::Moderate => 2,
            Self::Minor => 1,
            Self::Unknown => 0,
        }
    }
}

/// Latest conditions reported by an observation station.
///
/// The station is the first one listed for the forecast grid, which is a
/// convenience pick, not a computed nearest neighbor.
#[derive(Debug, Clone, PartialEq)]
pub struct Observation {
    /// Identifier of the reporting station
    pub station_id: String,
    /// Observation time, when the upstream timestamp parses
    pub timestamp: Option<DateTime<Utc>>,
    /// Temperature in degrees Celsius
    pub temperature_c: Option<f64>,
    /// Relative humidity in percent
    pub relative_humidity_pct: Option<f64>,
    /// Wind speed in m/s
    pub wind_speed_ms: Option<f64>,
    /// Wind direction in degrees
    pub wind_direction_deg: Option<f64>,
    /// Visibility in meters
    pub visibility_m: Option<f64>,
    /// Barometric pressure in pascals
    pub pressure_pa: Option<f64>,
    /// Human-readable conditions text
    pub description: Option<String>,
}

impl Observation {
    /// Build an observation from the upstream wire shape
    #[must_use]
    pub fn from_nws(station_id: String, props: nws::ObservationProperties) -> Self {
        let timestamp = props
            .timestamp
            .as_deref()
            .and_then(|raw| DateTime::parse_from_rfc3339(raw).ok())
            .map(|parsed| parsed.with_timezone(&Utc));

        Self {
            station_id,
            timestamp,
            temperature_c: props.temperature.value,
            relative_humidity_pct: props.relative_humidity.value,
            wind_speed_ms: props.wind_speed.value,
            wind_direction_deg: props.wind_direction.value,
            visibility_m: props.visibility.value,
            pressure_pa: props.barometric_pressure.value,
            description: props.text_description,
        }
    }
}

/// api.weather.gov response structures
pub mod nws {
    use serde::Deserialize;

    /// GeoJSON feature collection of active alerts
    #[derive(Debug, Clone, Deserialize)]
    pub struct AlertCollection {
        #[serde(default)]
        pub features: Vec<AlertFeature>,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct AlertFeature {
        #[serde(default)]
        pub properties: AlertProperties,
    }

    #[derive(Debug, Clone, Default, Deserialize)]
    #[serde(default, rename_all = "camelCase")]
    pub struct AlertProperties {
        pub event: Option<String>,
        pub area_desc: Option<String>,
        pub severity: Option<String>,
        pub status: Option<String>,
        pub headline: Option<String>,
    }

    /// Response of `/points/{lat},{lon}`
    #[derive(Debug, Deserialize)]
    pub struct PointsResponse {
        #[serde(default)]
        pub properties: PointProperties,
    }

    #[derive(Debug, Default, Deserialize)]
    #[serde(default, rename_all = "camelCase")]
    pub struct PointProperties {
        pub forecast: Option<String>,
        pub grid_id: Option<String>,
        pub grid_x: Option<i64>,
        pub grid_y: Option<i64>,
    }

    /// Response of the grid forecast URL
    #[derive(Debug, Deserialize)]
    pub struct ForecastResponse {
        #[serde(default)]
        pub properties: ForecastProperties,
    }

    #[derive(Debug, Default, Deserialize)]
    #[serde(default)]
    pub struct ForecastProperties {
        pub periods: Vec<ForecastPeriod>,
    }

    /// One named forecast period ("Tonight", "Friday", ...)
    #[derive(Debug, Clone, Default, Deserialize)]
    #[serde(default, rename_all = "camelCase")]
    pub struct ForecastPeriod {
        pub name: Option<String>,
        pub temperature: Option<f64>,
        pub temperature_unit: Option<String>,
        pub wind_speed: Option<String>,
        pub wind_direction: Option<String>,
        pub short_forecast: Option<String>,
    }

    /// Response of `/gridpoints/{gridId}/{gridX},{gridY}/stations`
    #[derive(Debug, Deserialize)]
    pub struct StationCollection {
        #[serde(default)]
        pub features: Vec<StationFeature>,
    }

    #[derive(Debug, Deserialize)]
    pub struct StationFeature {
        #[serde(default)]
        pub properties: StationProperties,
    }

    #[derive(Debug, Default, Deserialize)]
    #[serde(default, rename_all = "camelCase")]
    pub struct StationProperties {
        pub station_identifier: Option<String>,
    }

    /// Response of `/stations/{id}/observations/latest`
    #[derive(Debug, Deserialize)]
    pub struct ObservationResponse {
        pub properties: Option<ObservationProperties>,
    }

    #[derive(Debug, Clone, Default, Deserialize)]
    #[serde(default, rename_all = "camelCase")]
    pub struct ObservationProperties {
        pub timestamp: Option<String>,
        pub temperature: QuantitativeValue,
        pub relative_humidity: QuantitativeValue,
        pub wind_speed: QuantitativeValue,
        pub wind_direction: QuantitativeValue,
        pub visibility: QuantitativeValue,
        pub barometric_pressure: QuantitativeValue,
        pub text_description: Option<String>,
    }

    /// Measurement wrapper used throughout the observation payload;
    /// `value` is null for sensors the station does not report
    #[derive(Debug, Clone, Copy, Default, Deserialize)]
    #[serde(default)]
    pub struct QuantitativeValue {
        pub value: Option<f64>,
    }
}
