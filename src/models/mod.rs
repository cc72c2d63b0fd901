//! Data models for `WeatherDesk`
//!
//! - Location: geocoding suggestions and resolved places
//! - Weather: current conditions, condition buckets and result cards

pub mod location;
pub mod weather;

pub use location::{Location, PlaceSuggestion};
pub use weather::{Condition, CurrentConditions, ResultCard};
