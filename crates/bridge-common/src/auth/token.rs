//! Identity extraction from the player's access token
//!
//! The token comes from the host's own metadata channel, so the payload is read without
//! verifying the signature or the expiry. Only the shape is checked.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use bridge_core::IdentityClaim;

/// Token decoding errors
#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    #[error("Token must have exactly three dot-separated segments")]
    Malformed,

    #[error("Token payload is not valid base64url: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("Token payload is not a valid identity claim: {0}")]
    Json(#[from] serde_json::Error),
}

/// Decode the identity claim from a compact `header.payload.signature` token
pub fn decode_identity(token: &str) -> Result<IdentityClaim, TokenError> {
    let mut segments = token.split('.');
    let payload = match (
        segments.next(),
        segments.next(),
        segments.next(),
        segments.next(),
    ) {
        (Some(_header), Some(payload), Some(_signature), None) => payload,
        _ => return Err(TokenError::Malformed),
    };

    // Accept padded and standard-alphabet payloads as well
    let normalized: String = payload
        .trim_end_matches('=')
        .chars()
        .map(|c| match c {
            '+' => '-',
            '/' => '_',
            other => other,
        })
        .collect();

    let bytes = URL_SAFE_NO_PAD.decode(normalized.as_bytes())?;
    let claim = serde_json::from_slice::<IdentityClaim>(&bytes)?;

    tracing::debug!(subject = %claim.oid, tenant = ?claim.tid, "Decoded identity claim");

    Ok(claim)
}
