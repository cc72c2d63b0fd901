//! `WeatherDesk` - incremental place search with current weather cards
//!
//! This library provides the search controller and its async driver, the
//! Open-Meteo lookup client, a terminal front end, a small JSON API and a
//! Celsius/Fahrenheit converter.

pub mod api;
pub mod config;
pub mod converter;
pub mod error;
pub mod logging;
pub mod models;
pub mod repl;
pub mod search;
pub mod weather;
pub mod web;

// Re-export core types for public API
pub use config::WeatherDeskConfig;
pub use error::WeatherDeskError;
pub use models::{Condition, CurrentConditions, Location, PlaceSuggestion, ResultCard};
pub use search::{SearchSession, SearchState};
pub use weather::{OpenMeteoClient, WeatherLookup};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, WeatherDeskError>;
