//! Text rendering of tool results
//!
//! Pure presentation: every function takes already-aggregated data and
//! produces the text block the hosting boundary returns. Missing upstream
//! fields arrive as `None` and render as explicit "Unknown" markers.

use crate::aggregate::{self, RankedAlerts, UNKNOWN};
use crate::models::Observation;
use crate::models::nws::{AlertFeature, ForecastPeriod};
use crate::service::{ChainFailure, StateSummary};

/// Most event types listed in an alert overview line
const MAX_LISTED_EVENT_TYPES: usize = 5;

/// One alert as a block of labeled lines
#[must_use]
pub fn alert_block(feature: &AlertFeature) -> String {
    let props = &feature.properties;
    [
        format!("Event: {}", props.event.as_deref().unwrap_or(UNKNOWN)),
        format!("Area: {}", props.area_desc.as_deref().unwrap_or(UNKNOWN)),
        format!("Severity: {}", props.severity.as_deref().unwrap_or(UNKNOWN)),
        format!("Status: {}", props.status.as_deref().unwrap_or(UNKNOWN)),
        format!(
            "Headline: {}",
            props.headline.as_deref().unwrap_or("No headline")
        ),
        "---".to_string(),
    ]
    .join("\n")
}

/// Ranked alert listing with a severity summary line
#[must_use]
pub fn alerts_text(state: &str, ranked: &RankedAlerts) -> String {
    let summary = if ranked.severe_count > 0 {
        format!(
            "🚨 {state} has {} active alerts, {} of them severe",
            ranked.total, ranked.severe_count
        )
    } else {
        format!("⚠️ {state} has {} active alerts", ranked.total)
    };

    let blocks: Vec<String> = ranked.alerts.iter().map(alert_block).collect();
    format!("{summary}\n\n{}", blocks.join("\n"))
}

/// The distinct "feed answered, nothing active" outcome
#[must_use]
pub fn no_alerts_text(state: &str) -> String {
    format!("✅ No active weather alerts for {state}.")
}

/// The alert feed itself was unavailable
#[must_use]
pub fn alerts_unavailable_text(state: &str) -> String {
    format!("❌ Unable to fetch weather alerts for {state}. Please try again later.")
}

/// One forecast period as a block of labeled lines
#[must_use]
pub fn period_block(period: &ForecastPeriod) -> String {
    let temp = aggregate::format_temperature(period.temperature, period.temperature_unit.as_deref());
    let wind = match (period.wind_speed.as_deref(), period.wind_direction.as_deref()) {
        (Some(speed), Some(direction)) => format!("{speed} {direction}"),
        (Some(speed), None) => speed.to_string(),
        _ => UNKNOWN.to_string(),
    };

    [
        format!("📅 **{}**", period.name.as_deref().unwrap_or(UNKNOWN)),
        format!("🌡️ Temperature: {temp}"),
        format!("💨 Wind: {wind}"),
        format!(
            "☁️ Conditions: {}",
            period
                .short_forecast
                .as_deref()
                .unwrap_or("No forecast available")
        ),
        "---".to_string(),
    ]
    .join("\n")
}

/// Forecast listing for a labeled location, optionally truncated
#[must_use]
pub fn forecast_text(label: &str, periods: &[ForecastPeriod], limit: Option<usize>) -> String {
    let shown = match limit {
        Some(limit) => &periods[..periods.len().min(limit)],
        None => periods,
    };
    let blocks: Vec<String> = shown.iter().map(period_block).collect();
    format!("🌤️ **Weather forecast for {label}**\n\n{}", blocks.join("\n"))
}

/// Explain a degraded forecast chain
#[must_use]
pub fn forecast_unavailable_text(label: &str, failure: ChainFailure) -> String {
    match failure {
        ChainFailure::PointLookup => format!(
            "❌ Unable to fetch grid point data for {label}.\n\n\
             Possible reasons:\n\
             • The location is outside the United States (the NWS API covers US territory only)\n\
             • The coordinates are malformed\n\
             • A network problem\n\n\
             Please confirm the coordinates are correct and within the United States."
        ),
        ChainFailure::NoPeriods => {
            format!("❌ No forecast periods are currently available for {label}.")
        }
        _ => format!("❌ Unable to fetch the weather forecast for {label}. Please try again later."),
    }
}

/// Current conditions block for a labeled location
#[must_use]
pub fn observation_text(label: &str, observation: &Observation) -> String {
    let when = observation
        .timestamp
        .map_or_else(|| UNKNOWN.to_string(), |ts| {
            ts.format("%Y-%m-%d %H:%M UTC").to_string()
        });

    [
        format!("🌤️ **Current weather for {label}**"),
        format!("📍 Station: {}", observation.station_id),
        format!("🕐 Observed: {when}"),
        String::new(),
        format!(
            "🌡️ **Temperature**: {}",
            aggregate::format_celsius(observation.temperature_c)
        ),
        format!(
            "💧 **Humidity**: {}",
            aggregate::format_percent(observation.relative_humidity_pct)
        ),
        format!(
            "💨 **Wind speed**: {}",
            aggregate::format_wind_speed_kmh(observation.wind_speed_ms)
        ),
        format!(
            "🧭 **Wind direction**: {}",
            aggregate::format_degrees(observation.wind_direction_deg)
        ),
        format!(
            "👁️ **Visibility**: {}",
            aggregate::format_visibility_km(observation.visibility_m)
        ),
        format!(
            "📊 **Pressure**: {}",
            aggregate::format_pressure_hpa(observation.pressure_pa)
        ),
        String::new(),
        format!(
            "📝 **Conditions**: {}",
            observation
                .description
                .as_deref()
                .unwrap_or("No description")
        ),
    ]
    .join("\n")
}

/// Explain a degraded observation chain
#[must_use]
pub fn observation_unavailable_text(label: &str, failure: ChainFailure) -> String {
    match failure {
        ChainFailure::PointLookup => format!(
            "❌ Unable to fetch grid point data for {label}. \
             Please confirm the coordinates are within the United States."
        ),
        ChainFailure::NoStations => {
            format!("❌ No observation stations are available near {label}.")
        }
        _ => format!(
            "❌ Unable to fetch current weather observations for {label}. Please try again later."
        ),
    }
}

/// City name with no table entry, with suggestions of valid alternatives
#[must_use]
pub fn city_not_found_text(name: &str, suggestions: &[&str]) -> String {
    format!(
        "❌ No coordinates found for city \"{name}\".\n\n\
         Supported cities include: {}\n\n\
         If your city is not listed, use the get-forecast tool with explicit \
         latitude and longitude.",
        suggestions.join(", ")
    )
}

/// Full state summary: alert overview, per-city lines, closing hint
#[must_use]
pub fn summary_text(summary: &StateSummary) -> String {
    let alerts_overview = match &summary.alerts {
        None => "❌ **Alerts**: alert data is currently unavailable".to_string(),
        Some(ranked) if ranked.total == 0 => {
            "✅ **Alerts**: no active weather alerts".to_string()
        }
        Some(ranked) => {
            let status = if ranked.severe_count > 0 {
                format!(
                    "🚨 **Alerts**: {} active alerts ({} severe)",
                    ranked.total, ranked.severe_count
                )
            } else {
                format!("⚠️ **Alerts**: {} active alerts", ranked.total)
            };
            let listed: Vec<&str> = ranked
                .event_types
                .iter()
                .take(MAX_LISTED_EVENT_TYPES)
                .map(String::as_str)
                .collect();
            let more = if ranked.event_types.len() > MAX_LISTED_EVENT_TYPES {
                ", …"
            } else {
                ""
            };
            format!("{status}\n📋 **Alert types**: {}{more}", listed.join(", "))
        }
    };

    let mut lines = vec![
        format!("🌤️ **{} Weather Summary**", summary.state),
        String::new(),
        alerts_overview,
    ];

    if !summary.cities.is_empty() {
        lines.push(String::new());
        lines.push("🌆 **Major city weather**:".to_string());
        for city in &summary.cities {
            lines.push(city_summary_line(city));
        }
    }

    lines.push(String::new());
    lines.push(
        "💡 **Tip**: use get-alerts for full alert details and get-city-forecast for a \
         specific city forecast"
            .to_string(),
    );

    lines.join("\n")
}

fn city_summary_line(city: &crate::service::CitySummary) -> String {
    match &city.current {
        Some(period) => {
            let temp =
                aggregate::format_temperature(period.temperature, period.temperature_unit.as_deref());
            let conditions = period.short_forecast.as_deref().unwrap_or("No description");
            format!("🏙️ **{}**: {temp}, {conditions}", city.name)
        }
        None => format!("🏙️ **{}**: data currently unavailable", city.name),
    }
}
