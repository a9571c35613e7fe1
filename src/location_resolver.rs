//! Location resolution
//!
//! Maps a city name to a coordinate through the static table, and a
//! coordinate to its forecast grid metadata through the upstream point
//! lookup.

use crate::cities::{self, City};
use crate::client::NwsClient;
use crate::models::{Coordinate, GridReference, nws};
use tracing::debug;

/// Service for resolving location inputs
pub struct LocationResolver;

impl LocationResolver {
    /// Resolve a city name against the static table.
    ///
    /// Normalization is lower-case plus whitespace trim; matching is exact,
    /// with no fuzzy or partial matches. Performs no network I/O.
    #[must_use]
    pub fn resolve_city(name: &str) -> Option<&'static City> {
        let normalized = name.trim().to_lowercase();
        let city = cities::by_key(&normalized);
        match city {
            Some(city) => debug!(input = name, city = city.name, "resolved city"),
            None => debug!(input = name, "city not in table"),
        }
        city
    }

    /// Resolve a coordinate to its grid reference via the point lookup.
    ///
    /// Returns `None` when the lookup fails outright or the response omits
    /// any of `forecast`, `gridId`, `gridX`, `gridY`. Grid coordinates are
    /// checked for presence, never for truthiness: a gridX or gridY of 0 is
    /// a valid value.
    pub async fn resolve_grid(client: &NwsClient, coord: Coordinate) -> Option<GridReference> {
        let url = client.points_url(coord);
        let points: nws::PointsResponse = client.fetch(&url).await?;
        let props = points.properties;

        let grid_x = props.grid_x?;
        let grid_y = props.grid_y?;
        let grid_id = props.grid_id?;
        let forecast_url = props.forecast?;

        debug!(
            latitude = coord.latitude,
            longitude = coord.longitude,
            grid_id = %grid_id,
            grid_x,
            grid_y,
            "resolved grid reference"
        );

        Some(GridReference {
            grid_id,
            grid_x,
            grid_y,
            forecast_url,
        })
    }
}
