//! Domain layer: workout data model, input parsing and the backend port.

pub mod models;
pub mod services;
pub mod errors;

pub use models::*;
pub use services::*;
pub use errors::*;
