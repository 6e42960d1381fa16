//! Domain errors - error types for the domain layer

use thiserror::Error;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Presence status cannot be handled: {0}")]
    InvalidPresence(String),

    #[error("Presence {availability}/{activity} cannot be set as preferred presence")]
    NotWritable {
        availability: String,
        activity: String,
    },

    #[error("Invalid host metadata: {0}")]
    InvalidMetadata(String),

    // =========================================================================
    // Remote Presence API Errors (wrapped)
    // =========================================================================
    #[error("Presence API unreachable: {0}")]
    RemoteUnavailable(String),

    #[error("Presence API rejected the request with status {status}: {body}")]
    RemoteRejected { status: u16, body: String },

    #[error("Presence API returned an unreadable body: {0}")]
    RemoteParse(String),
}

impl DomainError {
    /// Get error code for log fields
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidPresence(_) => "INVALID_PRESENCE",
            Self::NotWritable { .. } => "PRESENCE_NOT_WRITABLE",
            Self::InvalidMetadata(_) => "INVALID_METADATA",
            Self::RemoteUnavailable(_) => "REMOTE_UNAVAILABLE",
            Self::RemoteRejected { .. } => "REMOTE_REJECTED",
            Self::RemoteParse(_) => "REMOTE_PARSE_ERROR",
        }
    }
}
