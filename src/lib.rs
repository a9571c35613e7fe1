//! weathergov-server - read-through cached weather tools over api.weather.gov
//!
//! This library resolves a location (coordinates, a US state code, or a known
//! city name) into a chain of dependent upstream calls, caches every upstream
//! response by URL for a freshness window, and renders the aggregated result
//! as text for a tool-calling consumer.

pub mod aggregate;
pub mod cache;
pub mod cities;
pub mod client;
pub mod config;
pub mod error;
pub mod format;
pub mod location_resolver;
pub mod models;
pub mod service;
pub mod tools;
pub mod web;

// Re-export core types for public API
pub use cache::ResponseCache;
pub use client::NwsClient;
pub use config::ServerConfig;
pub use error::WeatherServerError;
pub use location_resolver::LocationResolver;
pub use models::{Coordinate, GridReference, Observation};
pub use service::{ChainFailure, StateSummary, WeatherService};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, WeatherServerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
