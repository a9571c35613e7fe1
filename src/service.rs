//! Chain orchestration over the upstream client
//!
//! Each operation is a finite sequence of dependent fetches. A broken link
//! terminates the chain immediately with a [`ChainFailure`] naming the step;
//! there is no retry and a chain never re-resolves within one invocation.
//! The state summary is the single concurrent fan-out point: every city
//! branch runs independently and all branches are joined before returning.

use crate::aggregate::{self, RankedAlerts};
use crate::cities::{self, City};
use crate::client::NwsClient;
use crate::location_resolver::LocationResolver;
use crate::models::nws::{self, ForecastPeriod};
use crate::models::{Coordinate, Observation};
use thiserror::Error;
use tracing::debug;

/// Maximum number of city branches in the state summary fan-out
const SUMMARY_CITY_LIMIT: usize = 2;

/// The step at which a chain degraded. Chains report these as values,
/// never as raised faults crossing the boundary layer.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChainFailure {
    /// Point lookup failed or returned incomplete grid metadata
    #[error("grid point lookup failed")]
    PointLookup,
    /// The forecast document could not be fetched
    #[error("forecast fetch failed")]
    ForecastFetch,
    /// A well-formed forecast with zero periods
    #[error("no forecast periods available")]
    NoPeriods,
    /// No observation stations listed for the grid
    #[error("no observation stations available")]
    NoStations,
    /// The latest observation could not be fetched
    #[error("latest observation fetch failed")]
    ObservationFetch,
}

/// Weather summary for one state: alert overview plus per-city conditions
#[derive(Debug, Clone)]
pub struct StateSummary {
    pub state: String,
    /// `None` when the alert feed itself was unavailable; `Some` with zero
    /// alerts is the distinct "no active alerts" outcome
    pub alerts: Option<RankedAlerts>,
    pub cities: Vec<CitySummary>,
}

/// One fan-out branch result. A failed branch keeps its city name with no
/// period attached.
#[derive(Debug, Clone)]
pub struct CitySummary {
    pub name: &'static str,
    /// Current forecast period, when the branch succeeded
    pub current: Option<ForecastPeriod>,
}

/// Orchestrates the dependent-call chains behind the tool surface
pub struct WeatherService {
    client: NwsClient,
}

impl WeatherService {
    #[must_use]
    pub fn new(client: NwsClient) -> Self {
        Self { client }
    }

    /// Active alerts for a state. `Some` with an empty feature list means
    /// the feed answered and there are no alerts.
    pub async fn active_alerts(&self, state: &str) -> Option<nws::AlertCollection> {
        let url = self.client.alerts_url(state);
        self.client.fetch(&url).await
    }

    /// Forecast-by-coordinate chain: point lookup → forecast fetch →
    /// non-empty period list.
    pub async fn forecast_periods(
        &self,
        coord: Coordinate,
    ) -> Result<Vec<ForecastPeriod>, ChainFailure> {
        let grid = LocationResolver::resolve_grid(&self.client, coord)
            .await
            .ok_or(ChainFailure::PointLookup)?;

        let forecast: nws::ForecastResponse = self
            .client
            .fetch(&grid.forecast_url)
            .await
            .ok_or(ChainFailure::ForecastFetch)?;

        let periods = forecast.properties.periods;
        if periods.is_empty() {
            return Err(ChainFailure::NoPeriods);
        }
        Ok(periods)
    }

    /// Current-observation chain: point lookup → stations list → first
    /// listed station → latest observation.
    pub async fn latest_observation(
        &self,
        coord: Coordinate,
    ) -> Result<Observation, ChainFailure> {
        let grid = LocationResolver::resolve_grid(&self.client, coord)
            .await
            .ok_or(ChainFailure::PointLookup)?;

        let stations: nws::StationCollection = self
            .client
            .fetch(&self.client.stations_url(&grid))
            .await
            .ok_or(ChainFailure::NoStations)?;

        // First listed station, not a computed nearest neighbor
        let station_id = stations
            .features
            .first()
            .and_then(|feature| feature.properties.station_identifier.clone())
            .ok_or(ChainFailure::NoStations)?;

        let observation: nws::ObservationResponse = self
            .client
            .fetch(&self.client.latest_observation_url(&station_id))
            .await
            .ok_or(ChainFailure::ObservationFetch)?;

        let props = observation
            .properties
            .ok_or(ChainFailure::ObservationFetch)?;

        Ok(Observation::from_nws(station_id, props))
    }

    /// State summary: alert overview plus a concurrent fan-out over up to
    /// two representative cities. Branches run in parallel and are all
    /// awaited; one city failing leaves the others untouched.
    pub async fn state_summary(&self, state: &str) -> StateSummary {
        let alerts = self
            .active_alerts(state)
            .await
            .map(|collection| aggregate::rank_alerts(collection.features));

        let branches: Vec<_> = cities::keys_for_state(state)
            .iter()
            .take(SUMMARY_CITY_LIMIT)
            .filter_map(|key| cities::by_key(key))
            .map(|city| self.summarize_city(city))
            .collect();

        let cities = futures::future::join_all(branches).await;

        StateSummary {
            state: state.to_string(),
            alerts,
            cities,
        }
    }

    /// One fan-out branch: reduce the city's forecast to its current period
    async fn summarize_city(&self, city: &'static City) -> CitySummary {
        match self.forecast_periods(city.coordinate()).await {
            Ok(periods) => CitySummary {
                name: city.name,
                current: periods.into_iter().next(),
            },
            Err(failure) => {
                debug!(city = city.name, %failure, "summary branch degraded");
                CitySummary {
                    name: city.name,
                    current: None,
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::ResponseCache;
    use crate::config::UpstreamConfig;
    use serde_json::json;
    use std::time::Duration;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn service_for(server: &MockServer) -> WeatherService {
        let upstream = UpstreamConfig {
            base_url: server.uri(),
            ..UpstreamConfig::default()
        };
        let client =
            NwsClient::new(&upstream, ResponseCache::new(Duration::from_secs(300))).unwrap();
        WeatherService::new(client)
    }

    async fn mount_points(server: &MockServer, point_path: &str, grid_path: &str) {
        Mock::given(method("GET"))
            .and(path(point_path))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "properties": {
                    "forecast": format!("{}{grid_path}/forecast", server.uri()),
                    "gridId": "TST",
                    "gridX": 31,
                    "gridY": 80
                }
            })))
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn test_forecast_chain_complete() {
        let server = MockServer::start().await;
        mount_points(&server, "/points/40.7128,-74.0060", "/gridpoints/TST/31,80").await;
        Mock::given(method("GET"))
            .and(path("/gridpoints/TST/31,80/forecast"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "properties": {
                    "periods": [
                        {
                            "name": "Tonight",
                            "temperature": 61,
                            "temperatureUnit": "F",
                            "windSpeed": "8 mph",
                            "windDirection": "SW",
                            "shortForecast": "Partly Cloudy"
                        }
                    ]
                }
            })))
            .mount(&server)
            .await;

        let service = service_for(&server);
        let periods = service
            .forecast_periods(Coordinate::new(40.7128, -74.006))
            .await
            .unwrap();
        assert_eq!(periods.len(), 1);
        assert_eq!(periods[0].name.as_deref(), Some("Tonight"));
        assert_eq!(periods[0].temperature, Some(61.0));
    }

    #[tokio::test]
    async fn test_forecast_chain_degrades_at_point_lookup() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let service = service_for(&server);
        let result = service.forecast_periods(Coordinate::new(1.0, 2.0)).await;
        assert_eq!(result.unwrap_err(), ChainFailure::PointLookup);
    }

    #[tokio::test]
    async fn test_forecast_chain_distinguishes_empty_periods() {
        let server = MockServer::start().await;
        mount_points(&server, "/points/1.0000,2.0000", "/gridpoints/TST/31,80").await;
        Mock::given(method("GET"))
            .and(path("/gridpoints/TST/31,80/forecast"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"properties": {"periods": []}})),
            )
            .mount(&server)
            .await;

        let service = service_for(&server);
        let result = service.forecast_periods(Coordinate::new(1.0, 2.0)).await;
        assert_eq!(result.unwrap_err(), ChainFailure::NoPeriods);
    }

    #[tokio::test]
    async fn test_observation_chain_complete() {
        let server = MockServer::start().await;
        mount_points(&server, "/points/40.7128,-74.0060", "/gridpoints/TST/31,80").await;
        Mock::given(method("GET"))
            .and(path("/gridpoints/TST/31,80/stations"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "features": [
                    { "properties": { "stationIdentifier": "KNYC" } },
                    { "properties": { "stationIdentifier": "KLGA" } }
                ]
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/stations/KNYC/observations/latest"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "properties": {
                    "timestamp": "2024-03-01T12:00:00+00:00",
                    "temperature": { "value": 18.5 },
                    "relativeHumidity": { "value": 55.0 },
                    "windSpeed": { "value": 4.2 },
                    "textDescription": "Sunny"
                }
            })))
            .mount(&server)
            .await;

        let service = service_for(&server);
        let observation = service
            .latest_observation(Coordinate::new(40.7128, -74.006))
            .await
            .unwrap();
        // First listed station wins
        assert_eq!(observation.station_id, "KNYC");
        assert_eq!(observation.temperature_c, Some(18.5));
        assert_eq!(observation.description.as_deref(), Some("Sunny"));
    }

    #[tokio::test]
    async fn test_observation_chain_degrades_on_empty_station_list() {
        let server = MockServer::start().await;
        mount_points(&server, "/points/1.0000,2.0000", "/gridpoints/TST/31,80").await;
        Mock::given(method("GET"))
            .and(path("/gridpoints/TST/31,80/stations"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"features": []})))
            .mount(&server)
            .await;

        let service = service_for(&server);
        let result = service.latest_observation(Coordinate::new(1.0, 2.0)).await;
        assert_eq!(result.unwrap_err(), ChainFailure::NoStations);
    }

    #[tokio::test]
    async fn test_state_summary_partial_failure_keeps_healthy_branch() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/alerts"))
            .and(query_param("area", "CA"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"features": []})))
            .mount(&server)
            .await;

        // Los Angeles branch: full chain succeeds
        mount_points(
            &server,
            "/points/34.0522,-118.2437",
            "/gridpoints/TST/31,80",
        )
        .await;
        Mock::given(method("GET"))
            .and(path("/gridpoints/TST/31,80/forecast"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "properties": {
                    "periods": [
                        { "name": "Today", "temperature": 75, "temperatureUnit": "F",
                          "shortForecast": "Sunny" }
                    ]
                }
            })))
            .mount(&server)
            .await;

        // San Francisco branch: point lookup fails
        Mock::given(method("GET"))
            .and(path("/points/37.7749,-122.4194"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let service = service_for(&server);
        let summary = service.state_summary("CA").await;

        assert_eq!(summary.state, "CA");
        let ranked = summary.alerts.expect("alert feed answered");
        assert_eq!(ranked.total, 0);

        assert_eq!(summary.cities.len(), 2);
        let la = &summary.cities[0];
        assert_eq!(la.name, "Los Angeles");
        assert_eq!(
            la.current.as_ref().unwrap().short_forecast.as_deref(),
            Some("Sunny")
        );

        let sf = &summary.cities[1];
        assert_eq!(sf.name, "San Francisco");
        assert!(sf.current.is_none(), "failed branch degrades independently");
    }

    #[tokio::test]
    async fn test_state_summary_with_no_mapped_cities() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/alerts"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"features": []})))
            .mount(&server)
            .await;

        let service = service_for(&server);
        let summary = service.state_summary("AK").await;
        assert!(summary.cities.is_empty());
        assert!(summary.alerts.is_some());
    }
}
