//! # bridge-common
//!
//! Shared utilities including configuration, error handling, token decoding, and telemetry.

pub mod auth;
pub mod config;
pub mod error;
pub mod telemetry;

// Re-export commonly used types at crate root
pub use auth::{decode_identity, TokenError};
pub use config::{AppConfig, AppSettings, ConfigError, Environment, GraphSettings, PresenceSettings};
pub use error::{AppError, AppResult};
pub use telemetry::{try_init_tracing, try_init_tracing_with_config, TracingConfig, TracingError};
