//! HTTP client for api.weather.gov with read-through response caching
//!
//! Every request goes through [`NwsClient::fetch`]: cache lookup first, then
//! a GET with the fixed headers, then a cache write of the raw JSON payload.
//! Upstream failures of any kind (transport error, non-2xx status, body that
//! is not JSON, payload that does not match the expected shape) collapse into
//! a uniform `None`; callers decide how to degrade.
//!
//! Concurrent cold fetches of the same URL are not deduplicated; both may hit
//! the network and both cache writes are tolerated (last write wins).

use crate::cache::ResponseCache;
use crate::config::UpstreamConfig;
use crate::models::{Coordinate, GridReference};
use reqwest::Client;
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue, USER_AGENT};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};

/// Cached client for the upstream weather API
pub struct NwsClient {
    http: Client,
    cache: ResponseCache,
    base_url: String,
}

impl NwsClient {
    /// Create a new client with the fixed upstream headers and timeout
    pub fn new(upstream: &UpstreamConfig, cache: ResponseCache) -> crate::Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&upstream.user_agent).map_err(|_| {
                crate::WeatherServerError::config(format!(
                    "User agent is not a valid header value: {}",
                    upstream.user_agent
                ))
            })?,
        );
        headers.insert(ACCEPT, HeaderValue::from_static("application/geo+json"));

        let http = Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(upstream.timeout_seconds.into()))
            .build()
            .map_err(|err| {
                crate::WeatherServerError::config(format!("Failed to build HTTP client: {err}"))
            })?;

        Ok(Self {
            http,
            cache,
            base_url: upstream.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Fetch a JSON document, consulting the cache first.
    ///
    /// A cache hit inside the TTL returns the stored payload without any
    /// network call, so repeated fetches of one URL within the window are
    /// byte-identical. Any failure collapses to `None`.
    pub async fn fetch<T: DeserializeOwned>(&self, url: &str) -> Option<T> {
        if let Some(cached) = self.cache.get(url) {
            return decode(url, cached);
        }

        let response = match self.http.get(url).send().await {
            Ok(response) => response,
            Err(err) => {
                warn!(url, error = %err, "upstream request failed");
                return None;
            }
        };

        let status = response.status();
        if !status.is_success() {
            warn!(url, status = %status, "upstream returned non-success status");
            return None;
        }

        let payload: Value = match response.json().await {
            Ok(payload) => payload,
            Err(err) => {
                warn!(url, error = %err, "upstream payload was not valid JSON");
                return None;
            }
        };

        self.cache.put(url, payload.clone());
        debug!(url, "upstream call made");

        decode(url, payload)
    }

    /// `/alerts?area={STATE}`
    #[must_use]
    pub fn alerts_url(&self, state: &str) -> String {
        format!("{}/alerts?area={state}", self.base_url)
    }

    /// `/points/{lat},{lon}`, coordinates formatted to exactly 4 decimal
    /// places so near-identical repeats share a cache key
    #[must_use]
    pub fn points_url(&self, coord: Coordinate) -> String {
        format!(
            "{}/points/{:.4},{:.4}",
            self.base_url, coord.latitude, coord.longitude
        )
    }

    /// `/gridpoints/{gridId}/{gridX},{gridY}/stations`
    #[must_use]
    pub fn stations_url(&self, grid: &GridReference) -> String {
        format!(
            "{}/gridpoints/{}/{},{}/stations",
            self.base_url, grid.grid_id, grid.grid_x, grid.grid_y
        )
    }

    /// `/stations/{id}/observations/latest`
    #[must_use]
    pub fn latest_observation_url(&self, station_id: &str) -> String {
        format!("{}/stations/{station_id}/observations/latest", self.base_url)
    }
}

fn decode<T: DeserializeOwned>(url: &str, payload: Value) -> Option<T> {
    match serde_json::from_value(payload) {
        Ok(value) => Some(value),
        Err(err) => {
            warn!(url, error = %err, "upstream payload did not match expected shape");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::test_clock::ManualClock;
    use serde_json::json;
    use std::sync::Arc;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer, cache: ResponseCache) -> NwsClient {
        let upstream = UpstreamConfig {
            base_url: server.uri(),
            ..UpstreamConfig::default()
        };
        NwsClient::new(&upstream, cache).unwrap()
    }

    fn default_cache() -> ResponseCache {
        ResponseCache::new(Duration::from_secs(300))
    }

    #[tokio::test]
    async fn test_fetch_sends_fixed_headers() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/points/40.7128,-74.0060"))
            .and(header("user-agent", "weather-mcp-server/2.0"))
            .and(header("accept", "application/geo+json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"properties": {}})))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server, default_cache());
        let url = client.points_url(Coordinate::new(40.7128, -74.006));
        let fetched: Option<Value> = client.fetch(&url).await;
        assert!(fetched.is_some());
    }

    #[tokio::test]
    async fn test_repeat_fetch_within_ttl_hits_network_once() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/alerts"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"features": []})))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server, default_cache());
        let url = client.alerts_url("CA");
        let first: Option<Value> = client.fetch(&url).await;
        let second: Option<Value> = client.fetch(&url).await;

        assert!(first.is_some());
        assert_eq!(first, second);
        // expect(1) on the mock verifies the second call never left the cache
    }

    #[tokio::test]
    async fn test_expired_entry_triggers_a_new_network_call() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/alerts"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"features": []})))
            .expect(2)
            .mount(&server)
            .await;

        let clock = Arc::new(ManualClock::default());
        let cache = ResponseCache::with_clock(Duration::from_secs(300), clock.clone());
        let client = client_for(&server, cache);

        let url = client.alerts_url("NY");
        let _: Option<Value> = client.fetch(&url).await;
        clock.advance(300_001);
        let refetched: Option<Value> = client.fetch(&url).await;
        assert!(refetched.is_some());
    }

    #[tokio::test]
    async fn test_http_error_collapses_to_none() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/alerts"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let client = client_for(&server, default_cache());
        let fetched: Option<Value> = client.fetch(&client.alerts_url("CA")).await;
        assert!(fetched.is_none());
    }

    #[tokio::test]
    async fn test_error_responses_are_not_cached() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/alerts"))
            .respond_with(ResponseTemplate::new(500))
            .expect(2)
            .mount(&server)
            .await;

        let client = client_for(&server, default_cache());
        let url = client.alerts_url("CA");
        let _: Option<Value> = client.fetch(&url).await;
        let _: Option<Value> = client.fetch(&url).await;
    }

    #[tokio::test]
    async fn test_malformed_body_collapses_to_none() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/alerts"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let client = client_for(&server, default_cache());
        let fetched: Option<Value> = client.fetch(&client.alerts_url("CA")).await;
        assert!(fetched.is_none());
    }

    #[test]
    fn test_url_builders() {
        let upstream = UpstreamConfig {
            base_url: "https://api.weather.gov/".to_string(),
            ..UpstreamConfig::default()
        };
        let client = NwsClient::new(&upstream, default_cache()).unwrap();

        assert_eq!(
            client.alerts_url("TX"),
            "https://api.weather.gov/alerts?area=TX"
        );
        // Rounded to exactly 4 decimal places, keeping keys stable
        assert_eq!(
            client.points_url(Coordinate::new(40.71284, -74.006)),
            "https://api.weather.gov/points/40.7128,-74.0060"
        );

        let grid = GridReference {
            grid_id: "OKX".to_string(),
            grid_x: 0,
            grid_y: 0,
            forecast_url: String::new(),
        };
        assert_eq!(
            client.stations_url(&grid),
            "https://api.weather.gov/gridpoints/OKX/0,0/stations"
        );
        assert_eq!(
            client.latest_observation_url("KNYC"),
            "https://api.weather.gov/stations/KNYC/observations/latest"
        );
    }
}
