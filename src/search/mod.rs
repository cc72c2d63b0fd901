//! Incremental search with dependent lookup
//!
//! Typed text drives suggestion lookups; a selection or explicit commit
//! drives a two-stage resolve+fetch that yields a result card.

pub mod controller;
pub mod effect;
pub mod session;

pub use controller::{Phase, SearchState};
pub use effect::{Command, Event, LookupTag, Notice};
pub use session::SearchSession;
