//! Current conditions, condition classification and result cards

use serde::{Deserialize, Serialize};
use std::fmt;

/// Current weather at a resolved location
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct CurrentConditions {
    /// Temperature in Celsius
    pub temperature: f64,
    /// WMO weather interpretation code
    pub weather_code: i64,
}

impl CurrentConditions {
    /// Whole-degree display string, halves rounded up (21.5 -> "22°C", -2.5 -> "-2°C")
    #[must_use]
    pub fn display_temperature(&self) -> String {
        let whole = (self.temperature + 0.5).floor() as i64;
        format!("{whole}°C")
    }

    #[must_use]
    pub fn condition(&self) -> Condition {
        Condition::from_code(self.weather_code)
    }
}

/// Coarse condition bucket shown on a card
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Condition {
    ClearSky,
    PartlyCloudy,
    Rain,
    Snow,
    Thunderstorm,
    Cloudy,
}

impl Condition {
    /// Classify a weather code. Every integer maps to exactly one bucket.
    #[must_use]
    pub fn from_code(code: i64) -> Self {
        match code {
            0 => Self::ClearSky,
            1..=3 => Self::PartlyCloudy,
            51..=67 => Self::Rain,
            71..=77 => Self::Snow,
            95.. => Self::Thunderstorm,
            _ => Self::Cloudy,
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::ClearSky => "Clear Sky",
            Self::PartlyCloudy => "Partly Cloudy",
            Self::Rain => "Rain",
            Self::Snow => "Snow",
            Self::Thunderstorm => "Thunderstorm",
            Self::Cloudy => "Cloudy",
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One fetched result, immutable once built
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ResultCard {
    pub name: String,
    pub display_temperature: String,
    pub condition_label: String,
}

impl ResultCard {
    #[must_use]
    pub fn new(name: impl Into<String>, conditions: &CurrentConditions) -> Self {
        Self {
            name: name.into(),
            display_temperature: conditions.display_temperature(),
            condition_label: conditions.condition().label().to_string(),
        }
    }
}

impl fmt::Display for ResultCard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}  {}  {}",
            self.name, self.display_temperature, self.condition_label
        )
    }
}
