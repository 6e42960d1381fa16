//! # bridge-core
//!
//! Domain layer containing presence value objects, host metadata, host events and the ports
//! (host capability interface, remote presence API) the runtime is wired against.
//! This crate has zero dependencies on infrastructure (HTTP client, stdio, etc.).

pub mod entities;
pub mod error;
pub mod events;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{AccessToken, HostMetadata, IdentityClaim, PlayerMetadata, PreferredPresence, PresenceSnapshot};
pub use error::DomainError;
pub use events::HostEvent;
pub use traits::{Host, PortResult, PresenceApi, PresenceApiFactory};
pub use value_objects::{Activity, Availability, ExpirationDuration};
