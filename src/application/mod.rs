//! Application layer managing the form state and backend round trips.
//!
//! This module sits between the domain layer and the presentation layer:
//! it owns the draft and fetched workouts, and turns user intents into
//! gateway requests.

pub mod requests;
pub mod state;

pub use requests::*;
pub use state::*;
