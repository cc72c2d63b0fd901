//! Async driver for [`SearchState`]
//!
//! Runs the commands a transition returns against a [`WeatherLookup`].
//! Outstanding lookups live in a `FuturesUnordered` set, so their completions
//! are fed back in the order they actually finish.

use futures::StreamExt;
use futures::future::LocalBoxFuture;
use futures::stream::FuturesUnordered;
use tracing::debug;

use super::controller::SearchState;
use super::effect::{Command, Event, Notice};
use crate::weather::WeatherLookup;

pub struct SearchSession<'a, L> {
    lookup: &'a L,
    state: SearchState,
    in_flight: FuturesUnordered<LocalBoxFuture<'a, Event>>,
    notices: Vec<Notice>,
}

impl<'a, L: WeatherLookup> SearchSession<'a, L> {
    pub fn new(lookup: &'a L, state: SearchState) -> Self {
        Self {
            lookup,
            state,
            in_flight: FuturesUnordered::new(),
            notices: Vec::new(),
        }
    }

    #[must_use]
    pub fn state(&self) -> &SearchState {
        &self.state
    }

    /// Number of lookups still running
    #[must_use]
    pub fn in_flight(&self) -> usize {
        self.in_flight.len()
    }

    /// Notices raised since the last call, oldest first
    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    /// Apply an event and start whatever it asks for
    pub fn submit(&mut self, event: Event) {
        let commands = self.state.handle(event);
        for command in commands {
            self.run(command);
        }
    }

    /// Wait for the next lookup to finish and apply it.
    /// Returns `false` when nothing was in flight.
    pub async fn next_completion(&mut self) -> bool {
        match self.in_flight.next().await {
            Some(event) => {
                self.submit(event);
                true
            }
            None => false,
        }
    }

    /// Drive until every outstanding lookup has completed
    pub async fn settle(&mut self) {
        while self.next_completion().await {}
    }

    fn run(&mut self, command: Command) {
        let lookup = self.lookup;
        match command {
            Command::LookupSuggestions { tag, text } => {
                debug!("Starting suggestion lookup {:?}", tag);
                self.in_flight.push(Box::pin(async move {
                    let outcome = lookup.suggest(&text).await;
                    Event::SuggestionsLoaded { tag, outcome }
                }));
            }
            Command::Resolve { text } => {
                self.in_flight.push(Box::pin(async move {
                    let outcome = lookup.resolve(&text).await;
                    Event::ResolveCompleted {
                        query: text,
                        outcome,
                    }
                }));
            }
            Command::FetchWeather { location } => {
                self.in_flight.push(Box::pin(async move {
                    let outcome = lookup.current_conditions(&location).await;
                    Event::WeatherCompleted { location, outcome }
                }));
            }
            Command::Notify(notice) => self.notices.push(notice),
        }
    }
}
