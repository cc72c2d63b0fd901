//! Incremental search state and its transitions
//!
//! [`SearchState`] owns the query text, the suggestion dropdown, the card
//! history and the loading gate. Every transition mutates the state in place
//! and returns the [`Command`]s the driver has to run.
//!
//! Ordering rules:
//! - every issued suggestion lookup carries a fresh [`LookupTag`]; only the
//!   completion whose tag equals the current generation is applied
//! - clearing the dropdown (short query, commit) also advances the
//!   generation, so nothing issued earlier can reopen it
//! - while a commit is in flight, text changes, selections and commit
//!   requests are ignored

use std::collections::VecDeque;

use tracing::{debug, info, warn};

use super::effect::{Command, Event, LookupTag, Notice};
use crate::config::SearchConfig;
use crate::models::{CurrentConditions, Location, PlaceSuggestion, ResultCard};
use crate::Result;

/// Coarse view of where the controller is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// No text, no suggestions
    Idle,
    /// Text too short for suggestions
    Typing,
    /// Text long enough; a lookup is outstanding or its result is shown
    Suggesting,
    /// Resolve+fetch in flight
    Committing,
}

#[derive(Debug, Clone)]
pub struct SearchState {
    query: String,
    suggestions: Vec<PlaceSuggestion>,
    cards: VecDeque<ResultCard>,
    /// Text of the in-flight commit; `Some` means loading
    pending_commit: Option<String>,
    generation: LookupTag,
    min_query_length: usize,
}

impl Default for SearchState {
    fn default() -> Self {
        Self::new(SearchConfig::default().min_query_length)
    }
}

impl SearchState {
    /// Queries longer than `min_query_length` characters trigger suggestions
    #[must_use]
    pub fn new(min_query_length: usize) -> Self {
        Self {
            query: String::new(),
            suggestions: Vec::new(),
            cards: VecDeque::new(),
            pending_commit: None,
            generation: LookupTag(0),
            min_query_length,
        }
    }

    #[must_use]
    pub fn from_config(config: &SearchConfig) -> Self {
        Self::new(config.min_query_length)
    }

    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    #[must_use]
    pub fn suggestions(&self) -> &[PlaceSuggestion] {
        &self.suggestions
    }

    /// Card history, most recent first
    pub fn cards(&self) -> impl ExactSizeIterator<Item = &ResultCard> {
        self.cards.iter()
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.pending_commit.is_some()
    }

    /// Tag the next suggestion completion must carry to be applied
    #[must_use]
    pub fn current_tag(&self) -> LookupTag {
        self.generation
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        if self.is_loading() {
            Phase::Committing
        } else if self.query.is_empty() && self.suggestions.is_empty() {
            Phase::Idle
        } else if self.is_long_enough(&self.query) {
            Phase::Suggesting
        } else {
            Phase::Typing
        }
    }

    /// Apply any event
    pub fn handle(&mut self, event: Event) -> Vec<Command> {
        match event {
            Event::TextChanged(text) => self.on_text_changed(text),
            Event::SuggestionSelected(suggestion) => self.on_suggestion_selected(suggestion),
            Event::CommitRequested(text) => self.on_commit_requested(text),
            Event::SuggestionsLoaded { tag, outcome } => self.on_suggestions_loaded(tag, outcome),
            Event::ResolveCompleted { query, outcome } => self.on_resolve_completed(&query, outcome),
            Event::WeatherCompleted { location, outcome } => {
                self.on_weather_completed(location, outcome)
            }
        }
    }

    pub fn on_text_changed(&mut self, text: impl Into<String>) -> Vec<Command> {
        if self.is_loading() {
            debug!("Input disabled while loading, ignoring text change");
            return Vec::new();
        }

        self.query = text.into();
        let tag = self.advance_generation();

        if self.is_long_enough(&self.query) {
            debug!("Issuing suggestion lookup {:?} for '{}'", tag, self.query);
            vec![Command::LookupSuggestions {
                tag,
                text: self.query.clone(),
            }]
        } else {
            self.suggestions.clear();
            Vec::new()
        }
    }

    pub fn on_suggestions_loaded(
        &mut self,
        tag: LookupTag,
        outcome: Result<Vec<PlaceSuggestion>>,
    ) -> Vec<Command> {
        if tag != self.generation {
            debug!(
                "Discarding stale suggestions {:?} (current {:?})",
                tag, self.generation
            );
            return Vec::new();
        }
        if self.is_loading() {
            debug!("Discarding suggestions {:?} while loading", tag);
            return Vec::new();
        }

        match outcome {
            Ok(suggestions) => {
                debug!("Showing {} suggestions", suggestions.len());
                self.suggestions = suggestions;
            }
            Err(e) => {
                warn!("Error fetching suggestions: {}", e);
                self.suggestions.clear();
            }
        }
        Vec::new()
    }

    pub fn on_suggestion_selected(&mut self, suggestion: PlaceSuggestion) -> Vec<Command> {
        if self.is_loading() {
            debug!("Selection disabled while loading");
            return Vec::new();
        }

        self.query = suggestion.name;
        self.suggestions.clear();
        self.commit(self.query.clone())
    }

    pub fn on_commit_requested(&mut self, text: impl Into<String>) -> Vec<Command> {
        if self.is_loading() {
            debug!("Commit disabled while loading");
            return Vec::new();
        }

        self.suggestions.clear();
        self.commit(text.into())
    }

    fn commit(&mut self, text: String) -> Vec<Command> {
        // Nothing outstanding may reopen the cleared dropdown, even on a blank commit
        self.advance_generation();
        if text.trim().is_empty() {
            return Vec::new();
        }

        info!("Searching weather for '{}'", text);
        self.pending_commit = Some(text.clone());
        vec![Command::Resolve { text }]
    }

    pub fn on_resolve_completed(
        &mut self,
        query: &str,
        outcome: Result<Option<Location>>,
    ) -> Vec<Command> {
        if self.pending_commit.as_deref() != Some(query) {
            warn!("Ignoring resolve result for '{}' with no matching commit", query);
            return Vec::new();
        }

        match outcome {
            Ok(Some(location)) => vec![Command::FetchWeather { location }],
            Ok(None) => {
                self.pending_commit = None;
                vec![Command::Notify(Notice::NotFound {
                    query: query.to_string(),
                })]
            }
            Err(e) => {
                warn!("Failed to resolve '{}': {}", query, e);
                self.pending_commit = None;
                vec![Command::Notify(Notice::NetworkFailed)]
            }
        }
    }

    pub fn on_weather_completed(
        &mut self,
        location: Location,
        outcome: Result<CurrentConditions>,
    ) -> Vec<Command> {
        if !self.is_loading() {
            warn!("Ignoring weather for {} with no commit in flight", location.name);
            return Vec::new();
        }
        self.pending_commit = None;

        match outcome {
            Ok(conditions) => {
                let card = ResultCard::new(location.name, &conditions);
                info!("New card: {}", card);
                self.cards.push_front(card);
                self.query.clear();
                Vec::new()
            }
            Err(e) => {
                warn!("Failed to fetch weather for {}: {}", location.name, e);
                vec![Command::Notify(Notice::NetworkFailed)]
            }
        }
    }

    fn is_long_enough(&self, text: &str) -> bool {
        text.chars().count() > self.min_query_length
    }

    fn advance_generation(&mut self) -> LookupTag {
        self.generation = LookupTag(self.generation.0 + 1);
        self.generation
    }
}
