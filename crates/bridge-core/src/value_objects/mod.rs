//! Value objects - immutable types that represent domain concepts

mod availability;
mod expiration;

pub use availability::{Activity, Availability};
pub use expiration::ExpirationDuration;
