//! Aggregation and ranking of upstream results
//!
//! Severity-ordered alert ranking plus the unit conversions used when
//! rendering forecasts and observations. Every conversion guards against an
//! absent source value and renders "Unknown" instead of computing on a null.

use crate::models::AlertSeverity;
use crate::models::nws::AlertFeature;
use std::cmp::Reverse;

/// Marker rendered wherever an upstream field is missing
pub const UNKNOWN: &str = "Unknown";

/// Alert list ordered by severity, with derived counts
#[derive(Debug, Clone)]
pub struct RankedAlerts {
    /// Alerts sorted descending by severity rank; ties keep upstream order
    pub alerts: Vec<AlertFeature>,
    /// Total number of alerts
    pub total: usize,
    /// Number of alerts with severity "Severe"
    pub severe_count: usize,
    /// Distinct non-empty event names, in encounter order
    pub event_types: Vec<String>,
}

/// Rank alerts by severity (Severe=3, Moderate=2, Minor=1, other=0),
/// descending. The sort is stable, so alerts of equal severity retain their
/// upstream order.
#[must_use]
pub fn rank_alerts(mut features: Vec<AlertFeature>) -> RankedAlerts {
    let total = features.len();
    let severe_count = features
        .iter()
        .filter(|feature| severity_of(feature) == AlertSeverity::Severe)
        .count();

    let mut event_types: Vec<String> = Vec::new();
    for feature in &features {
        if let Some(event) = feature.properties.event.as_deref() {
            if !event.is_empty() && !event_types.iter().any(|seen| seen == event) {
                event_types.push(event.to_string());
            }
        }
    }

    features.sort_by_key(|feature| Reverse(severity_of(feature).rank()));

    RankedAlerts {
        alerts: features,
        total,
        severe_count,
        event_types,
    }
}

fn severity_of(feature: &AlertFeature) -> AlertSeverity {
    AlertSeverity::parse(feature.properties.severity.as_deref())
}

/// Format a forecast temperature with its Celsius equivalent.
///
/// The unit tag defaults to Fahrenheit; for Fahrenheit values the Celsius
/// rendering is `(v - 32) * 5 / 9` rounded to the nearest integer, otherwise
/// the value passes through unchanged.
#[must_use]
pub fn format_temperature(value: Option<f64>, unit: Option<&str>) -> String {
    let Some(value) = value else {
        return UNKNOWN.to_string();
    };
    let unit = unit.unwrap_or("F");
    let celsius = if unit == "F" {
        ((value - 32.0) * 5.0 / 9.0).round()
    } else {
        value
    };
    format!("{value}°{unit} ({celsius}°C)")
}

/// Celsius observation temperature with its Fahrenheit equivalent
#[must_use]
pub fn format_celsius(value: Option<f64>) -> String {
    match value {
        Some(celsius) => {
            let fahrenheit = (celsius * 9.0 / 5.0 + 32.0).round();
            format!("{}°C ({fahrenheit}°F)", celsius.round())
        }
        None => UNKNOWN.to_string(),
    }
}

/// Relative humidity percentage
#[must_use]
pub fn format_percent(value: Option<f64>) -> String {
    match value {
        Some(pct) => format!("{}%", pct.round()),
        None => UNKNOWN.to_string(),
    }
}

/// Wind speed, m/s converted to km/h
#[must_use]
pub fn format_wind_speed_kmh(value: Option<f64>) -> String {
    match value {
        Some(ms) => format!("{} km/h", (ms * 3.6).round()),
        None => UNKNOWN.to_string(),
    }
}

/// Wind direction in degrees
#[must_use]
pub fn format_degrees(value: Option<f64>) -> String {
    match value {
        Some(deg) => format!("{}°", deg.round()),
        None => UNKNOWN.to_string(),
    }
}

/// Visibility, meters converted to kilometers
#[must_use]
pub fn format_visibility_km(value: Option<f64>) -> String {
    match value {
        Some(meters) => format!("{} km", (meters / 1000.0).round()),
        None => UNKNOWN.to_string(),
    }
}

/// Pressure, pascals converted to hectopascals
#[must_use]
pub fn format_pressure_hpa(value: Option<f64>) -> String {
    match value {
        Some(pa) => format!("{} hPa", (pa / 100.0).round()),
        None => UNKNOWN.to_string(),
    }
}
