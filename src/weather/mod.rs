//! Remote lookups the search controller depends on
//!
//! [`WeatherLookup`] is the seam between the controller and the network;
//! [`open_meteo::OpenMeteoClient`] is the production implementation.

use tracing::{debug, instrument};

use crate::models::{CurrentConditions, Location, PlaceSuggestion, ResultCard};
use crate::{Result, WeatherDeskError};

pub mod open_meteo;

pub use open_meteo::OpenMeteoClient;

/// Geocoding and current-weather lookups
pub trait WeatherLookup {
    /// Autocomplete candidates for free text. No match is an empty list.
    async fn suggest(&self, name: &str) -> Result<Vec<PlaceSuggestion>>;

    /// Best single match for a place name, if any
    async fn resolve(&self, name: &str) -> Result<Option<Location>>;

    /// Current temperature and weather code at a location
    async fn current_conditions(&self, location: &Location) -> Result<CurrentConditions>;
}

/// Resolve a name and fetch its current weather in one go.
///
/// Used where no controller state is involved (one-shot CLI, HTTP API).
#[instrument(skip(lookup))]
pub async fn resolve_and_fetch<L: WeatherLookup>(lookup: &L, name: &str) -> Result<ResultCard> {
    if name.trim().is_empty() {
        return Err(WeatherDeskError::validation("Location cannot be empty"));
    }

    let location = lookup
        .resolve(name)
        .await?
        .ok_or_else(|| WeatherDeskError::not_found(name))?;
    debug!(
        "Resolved '{}' to {} ({})",
        name,
        location.name,
        location.format_coordinates()
    );

    let conditions = lookup.current_conditions(&location).await?;
    Ok(ResultCard::new(location.name, &conditions))
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedLookup {
        location: Option<Location>,
        fail_fetch: bool,
    }

    impl WeatherLookup for FixedLookup {
        async fn suggest(&self, _name: &str) -> Result<Vec<PlaceSuggestion>> {
            Ok(Vec::new())
        }

        async fn resolve(&self, _name: &str) -> Result<Option<Location>> {
            Ok(self.location.clone())
        }

        async fn current_conditions(&self, _location: &Location) -> Result<CurrentConditions> {
            if self.fail_fetch {
                return Err(WeatherDeskError::network("connection reset"));
            }
            Ok(CurrentConditions {
                temperature: 21.4,
                weather_code: 0,
            })
        }
    }

    fn paris() -> Option<Location> {
        Some(Location::new(48.8534, 2.3488, "Paris".to_string()))
    }

    #[tokio::test]
    async fn test_resolve_and_fetch_builds_card() {
        let lookup = FixedLookup {
            location: paris(),
            fail_fetch: false,
        };
        let card = resolve_and_fetch(&lookup, "paris").await.unwrap();
        assert_eq!(card, ResultCard {
            name: "Paris".to_string(),
            display_temperature: "21°C".to_string(),
            condition_label: "Clear Sky".to_string(),
        });
    }

    #[tokio::test]
    async fn test_resolve_and_fetch_not_found() {
        let lookup = FixedLookup {
            location: None,
            fail_fetch: false,
        };
        let err = resolve_and_fetch(&lookup, "Atlantis").await.unwrap_err();
        assert!(matches!(err, WeatherDeskError::NotFound { query } if query == "Atlantis"));
    }

    #[tokio::test]
    async fn test_resolve_and_fetch_rejects_blank_name() {
        let lookup = FixedLookup {
            location: paris(),
            fail_fetch: false,
        };
        let err = resolve_and_fetch(&lookup, "   ").await.unwrap_err();
        assert!(matches!(err, WeatherDeskError::Validation { .. }));
    }

    #[tokio::test]
    async fn test_resolve_and_fetch_propagates_network_failure() {
        let lookup = FixedLookup {
            location: paris(),
            fail_fetch: true,
        };
        let err = resolve_and_fetch(&lookup, "Paris").await.unwrap_err();
        assert!(err.is_remote());
    }
}
