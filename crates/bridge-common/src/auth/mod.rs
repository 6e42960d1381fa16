//! Access token utilities

mod token;

pub use token::{decode_identity, TokenError};
