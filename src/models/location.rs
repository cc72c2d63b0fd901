//! Place models: geocoding suggestions and resolved locations

use serde::{Deserialize, Serialize};

/// One entry of the autocomplete dropdown
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct PlaceSuggestion {
    /// Place name (city, town, ...)
    pub name: String,
    /// First-level administrative region (state, province, ...)
    pub admin_region: Option<String>,
    pub country: Option<String>,
    /// Latitude in decimal degrees
    pub latitude: f64,
    /// Longitude in decimal degrees
    pub longitude: f64,
}

impl PlaceSuggestion {
    /// Secondary text used to tell homonyms apart, e.g. "England, United Kingdom"
    #[must_use]
    pub fn subtext(&self) -> String {
        match (&self.admin_region, &self.country) {
            (Some(region), Some(country)) => format!("{region}, {country}"),
            (Some(region), None) => region.clone(),
            (None, Some(country)) => country.clone(),
            (None, None) => String::new(),
        }
    }
}

/// A place name resolved to coordinates
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Location {
    /// Latitude in decimal degrees
    pub latitude: f64,
    /// Longitude in decimal degrees
    pub longitude: f64,
    /// Location name (city, region, etc.)
    pub name: String,
    pub country: Option<String>,
}

impl Location {
    /// Create a new location
    #[must_use]
    pub fn new(latitude: f64, longitude: f64, name: String) -> Self {
        Self {
            latitude,
            longitude,
            name,
            country: None,
        }
    }

    /// Format location as coordinates string
    #[must_use]
    pub fn format_coordinates(&self) -> String {
        format!("{:.4}, {:.4}", self.latitude, self.longitude)
    }
}

impl From<PlaceSuggestion> for Location {
    fn from(suggestion: PlaceSuggestion) -> Self {
        Self {
            latitude: suggestion.latitude,
            longitude: suggestion.longitude,
            name: suggestion.name,
            country: suggestion.country,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn suggestion(admin_region: Option<&str>, country: Option<&str>) -> PlaceSuggestion {
        PlaceSuggestion {
            name: "London".to_string(),
            admin_region: admin_region.map(str::to_string),
            country: country.map(str::to_string),
            latitude: 51.5085,
            longitude: -0.1257,
        }
    }

    #[test]
    fn test_subtext_variants() {
        assert_eq!(
            suggestion(Some("England"), Some("United Kingdom")).subtext(),
            "England, United Kingdom"
        );
        assert_eq!(suggestion(None, Some("Canada")).subtext(), "Canada");
        assert_eq!(suggestion(Some("Ontario"), None).subtext(), "Ontario");
        assert_eq!(suggestion(None, None).subtext(), "");
    }

    #[test]
    fn test_location_from_suggestion() {
        let location = Location::from(suggestion(Some("England"), Some("United Kingdom")));
        assert_eq!(location.name, "London");
        assert_eq!(location.country.as_deref(), Some("United Kingdom"));
        assert_eq!(location.format_coordinates(), "51.5085, -0.1257");
    }
}
