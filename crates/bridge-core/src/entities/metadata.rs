//! Host-provided player metadata

use serde::{Deserialize, Serialize};
use serde_json::Value;
use validator::{Validate, ValidationError};

use crate::error::DomainError;

/// Metadata object handed over by the host on initialization
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct HostMetadata {
    #[validate(nested)]
    pub player: PlayerMetadata,
}

/// Player section of the host metadata
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PlayerMetadata {
    #[validate(custom(function = "at_least_one_token"))]
    pub access_tokens: Vec<AccessToken>,
}

// Reports the failure without attaching the list, so token values never reach the error
fn at_least_one_token(tokens: &[AccessToken]) -> Result<(), ValidationError> {
    if tokens.is_empty() {
        return Err(ValidationError::new("access_tokens_empty")
            .with_message("At least one access token is required".into()));
    }
    Ok(())
}

/// Access token record
#[derive(Clone, Deserialize, Serialize)]
pub struct AccessToken {
    pub token: String,
}

impl std::fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccessToken")
            .field("token", &"[REDACTED]")
            .finish()
    }
}

impl HostMetadata {
    /// Parse and validate the raw metadata value
    pub fn from_value(value: &Value) -> Result<Self, DomainError> {
        let metadata = Self::deserialize(value)
            .map_err(|e| DomainError::InvalidMetadata(e.to_string()))?;

        metadata
            .validate()
            .map_err(|e| DomainError::InvalidMetadata(e.to_string()))?;

        Ok(metadata)
    }

    /// The token the bridge authenticates with (only the first record is used)
    #[must_use]
    pub fn access_token(&self) -> Option<&str> {
        self.player
            .access_tokens
            .first()
            .map(|record| record.token.as_str())
    }
}
