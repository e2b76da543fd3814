//! Presentation layer handling terminal UI and user input.
//!
//! This module renders the workout form and the recent workouts pane with
//! ratatui and maps crossterm key presses onto application operations.

pub mod ui;
pub mod input;

pub use ui::*;
pub use input::*;
