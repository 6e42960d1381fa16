//! Identity claim carried by the player's single sign-on token

use serde::{Deserialize, Serialize};

/// Identity extracted from the access token payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityClaim {
    /// Object ID of the user in the directory (used as `users/{id}` on the remote API)
    pub oid: String,
    /// Tenant ID
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tid: Option<String>,
    /// Display name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Sign-in name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferred_username: Option<String>,
}

impl IdentityClaim {
    /// Create a claim with only the subject identifier
    #[must_use]
    pub fn new(oid: impl Into<String>) -> Self {
        Self {
            oid: oid.into(),
            tid: None,
            name: None,
            preferred_username: None,
        }
    }

    /// Subject identifier used for remote presence writes
    #[must_use]
    pub fn subject(&self) -> &str {
        &self.oid
    }
}
