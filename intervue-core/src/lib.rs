//! Intervue Core - shared foundation for the interview platform client
//!
//! This crate defines the error, logging, configuration and domain types
//! shared by the session and API layers.

pub mod config;
pub mod error;
pub mod logging;
pub mod types;

pub use config::*;
pub use error::*;
pub use logging::*;
pub use types::*;

// Re-export commonly used external types
pub use tracing;
