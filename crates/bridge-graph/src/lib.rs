//! # bridge-graph
//!
//! Client for the Microsoft Graph presence endpoints, exposed to the runtime through the
//! `PresenceApi` port.

pub mod client;
pub mod config;
pub mod error;
pub mod factory;

pub use client::GraphClient;
pub use config::{GraphConfig, DEFAULT_GRAPH_BASE_URL};
pub use error::GraphError;
pub use factory::GraphClientFactory;
