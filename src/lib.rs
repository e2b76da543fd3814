//! Workout Logger Library
//!
//! A terminal client for logging workouts against a remote workout API and
//! browsing the workouts already saved for a user.

pub mod domain;
pub mod application;
pub mod infrastructure;
pub mod presentation;

pub use domain::*;
pub use application::*;
