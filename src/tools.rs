//! Tool surface exposed to the hosting boundary
//!
//! Each tool is a named operation with typed, validated arguments and a text
//! result. Argument validation failures surface as
//! [`WeatherServerError::Validation`]; degraded upstream data never does —
//! the response text explains the degradation instead.

use crate::models::Coordinate;
use crate::service::WeatherService;
use crate::{WeatherServerError, aggregate, cities, format, location_resolver::LocationResolver};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Names of the registered tools
pub const TOOL_NAMES: &[&str] = &[
    "get-alerts",
    "get-forecast",
    "get-city-forecast",
    "get-current-weather",
    "get-weather-summary",
];

/// Forecast periods shown for a city lookup (about three days)
const CITY_FORECAST_PERIODS: usize = 6;

/// Number of city names suggested when a lookup misses
const CITY_SUGGESTIONS: usize = 10;

/// Arguments for `get-alerts` and `get-weather-summary`
#[derive(Debug, Deserialize)]
pub struct StateArgs {
    /// Two-letter state code, e.g. CA, NY, TX
    pub state: String,
}

/// Arguments for `get-forecast` and `get-current-weather`
#[derive(Debug, Deserialize)]
pub struct PointArgs {
    pub latitude: f64,
    pub longitude: f64,
}

/// Arguments for `get-city-forecast`
#[derive(Debug, Deserialize)]
pub struct CityArgs {
    #[serde(alias = "cityName")]
    pub city_name: String,
}

/// Dispatch a tool invocation by name.
///
/// Returns `Err` only for unknown tools and invalid arguments; every other
/// outcome, including fully degraded chains, is a text result.
pub async fn dispatch(
    service: &WeatherService,
    name: &str,
    args: Value,
) -> crate::Result<String> {
    match name {
        "get-alerts" => {
            let args: StateArgs = parse_args(args)?;
            let state = validated_state(&args.state)?;
            Ok(get_alerts(service, &state).await)
        }
        "get-forecast" => {
            let args: PointArgs = parse_args(args)?;
            let coord = validated_point(args.latitude, args.longitude)?;
            Ok(get_forecast(service, coord).await)
        }
        "get-city-forecast" => {
            let args: CityArgs = parse_args(args)?;
            if args.city_name.trim().is_empty() {
                return Err(WeatherServerError::validation("City name cannot be empty"));
            }
            Ok(get_city_forecast(service, &args.city_name).await)
        }
        "get-current-weather" => {
            let args: PointArgs = parse_args(args)?;
            let coord = validated_point(args.latitude, args.longitude)?;
            Ok(get_current_weather(service, coord).await)
        }
        "get-weather-summary" => {
            let args: StateArgs = parse_args(args)?;
            let state = validated_state(&args.state)?;
            Ok(get_weather_summary(service, &state).await)
        }
        other => Err(WeatherServerError::unknown_tool(other)),
    }
}

fn parse_args<T: DeserializeOwned>(args: Value) -> crate::Result<T> {
    serde_json::from_value(args)
        .map_err(|err| WeatherServerError::validation(format!("Invalid arguments: {err}")))
}

/// Upper-cased state code, exactly two characters
fn validated_state(raw: &str) -> crate::Result<String> {
    let state = raw.trim().to_uppercase();
    if state.chars().count() != 2 {
        return Err(WeatherServerError::validation(format!(
            "State must be a two-letter code (e.g. CA, NY, TX), got: \"{raw}\""
        )));
    }
    Ok(state)
}

/// Coordinate within valid latitude/longitude bounds
fn validated_point(latitude: f64, longitude: f64) -> crate::Result<Coordinate> {
    if !(-90.0..=90.0).contains(&latitude) {
        return Err(WeatherServerError::validation(format!(
            "Latitude must be between -90 and 90, got: {latitude}"
        )));
    }
    if !(-180.0..=180.0).contains(&longitude) {
        return Err(WeatherServerError::validation(format!(
            "Longitude must be between -180 and 180, got: {longitude}"
        )));
    }
    Ok(Coordinate::new(latitude, longitude))
}

async fn get_alerts(service: &WeatherService, state: &str) -> String {
    match service.active_alerts(state).await {
        None => format::alerts_unavailable_text(state),
        Some(collection) if collection.features.is_empty() => format::no_alerts_text(state),
        Some(collection) => {
            format::alerts_text(state, &aggregate::rank_alerts(collection.features))
        }
    }
}

async fn get_forecast(service: &WeatherService, coord: Coordinate) -> String {
    let label = format!("coordinates {}, {}", coord.latitude, coord.longitude);
    match service.forecast_periods(coord).await {
        Ok(periods) => format::forecast_text(&label, &periods, None),
        Err(failure) => format::forecast_unavailable_text(&label, failure),
    }
}

async fn get_city_forecast(service: &WeatherService, city_name: &str) -> String {
    let Some(city) = LocationResolver::resolve_city(city_name) else {
        return format::city_not_found_text(city_name, &cities::sample_names(CITY_SUGGESTIONS));
    };

    match service.forecast_periods(city.coordinate()).await {
        Ok(periods) => {
            let header = format!(
                "{}\n📍 Coordinates: {}, {}",
                city.name, city.latitude, city.longitude
            );
            format::forecast_text(&header, &periods, Some(CITY_FORECAST_PERIODS))
        }
        Err(failure) => format::forecast_unavailable_text(city.name, failure),
    }
}

async fn get_current_weather(service: &WeatherService, coord: Coordinate) -> String {
    let label = format!("coordinates {}, {}", coord.latitude, coord.longitude);
    match service.latest_observation(coord).await {
        Ok(observation) => format::observation_text(&label, &observation),
        Err(failure) => format::observation_unavailable_text(&label, failure),
    }
}

async fn get_weather_summary(service: &WeatherService, state: &str) -> String {
    format::summary_text(&service.state_summary(state).await)
}
