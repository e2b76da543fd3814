//! Infrastructure layer providing external service integrations.
//!
//! This module contains the HTTP gateway, the background request
//! dispatcher, configuration loading and CSV export.

pub mod config;
pub mod dispatcher;
pub mod export;
pub mod gateway;

pub use config::*;
pub use dispatcher::*;
pub use export::*;
pub use gateway::*;
