//! Commands and events exchanged between the controller and its driver
//!
//! The controller never performs I/O. Each transition returns commands that
//! the driver executes; their results come back as events.

use std::fmt;

use crate::error::{NETWORK_FAILED_MESSAGE, NOT_FOUND_MESSAGE};
use crate::models::{CurrentConditions, Location, PlaceSuggestion};
use crate::Result;

/// Generation tag carried by every suggestion lookup
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LookupTag(pub u64);

/// Side effects requested by a transition
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Fetch autocomplete candidates for `text`
    LookupSuggestions { tag: LookupTag, text: String },
    /// Geocode `text` to its best single match
    Resolve { text: String },
    /// Fetch current weather for a resolved location
    FetchWeather { location: Location },
    /// Show a blocking notice to the user
    Notify(Notice),
}

/// User-visible failure notices
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    NotFound { query: String },
    NetworkFailed,
}

impl Notice {
    #[must_use]
    pub fn message(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => NOT_FOUND_MESSAGE,
            Self::NetworkFailed => NETWORK_FAILED_MESSAGE,
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Inputs to the controller: user actions and lookup completions
#[derive(Debug)]
pub enum Event {
    TextChanged(String),
    SuggestionSelected(PlaceSuggestion),
    CommitRequested(String),
    SuggestionsLoaded {
        tag: LookupTag,
        outcome: Result<Vec<PlaceSuggestion>>,
    },
    ResolveCompleted {
        query: String,
        outcome: Result<Option<Location>>,
    },
    WeatherCompleted {
        location: Location,
        outcome: Result<CurrentConditions>,
    },
}
