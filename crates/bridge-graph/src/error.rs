//! Presence client errors.

use bridge_core::DomainError;

#[derive(Debug, thiserror::Error)]
pub enum GraphError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("HTTP {status}: {body}")]
    Api { status: u16, body: String },

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Client setup failed: {0}")]
    Build(String),
}

impl From<GraphError> for DomainError {
    fn from(err: GraphError) -> Self {
        match err {
            GraphError::Api { status, body } => Self::RemoteRejected { status, body },
            GraphError::Parse(msg) => Self::RemoteParse(msg),
            GraphError::Network(e) => Self::RemoteUnavailable(e.to_string()),
            GraphError::Build(msg) => Self::RemoteUnavailable(msg),
        }
    }
}
