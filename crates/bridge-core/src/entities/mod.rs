//! Domain entities

mod identity;
mod metadata;
mod presence;

pub use identity::IdentityClaim;
pub use metadata::{AccessToken, HostMetadata, PlayerMetadata};
pub use presence::{PreferredPresence, PresenceSnapshot};
