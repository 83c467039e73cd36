//! Unverified JWT payload decoding.
//!
//! The backend issues JSON Web Tokens; the client only ever looks inside the
//! claims segment to display the current user and to check expiry locally.
//!
//! **No signature verification is performed.** A successful decode says
//! nothing about the token's authenticity; the trust decision belongs to the
//! backend, which re-validates the token on every protected request. Treat
//! the output of this module as display data, never as an authorization
//! check.

use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use serde::{Deserialize, Serialize};

use crate::observability::TOKEN_DECODE_FAILURES;

/// Claims decoded from a token payload.
///
/// Recognized claims get typed fields; everything else is preserved opaquely
/// in `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject. The backend sets this to the username.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,

    /// Expiry as epoch seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,

    /// Issued-at as epoch seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,

    /// Claims this client does not interpret.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Decodes the claims segment of a JWT without verifying its signature.
///
/// Returns `None` unless the token has exactly three dot-separated segments
/// and the middle segment is URL-safe base64 wrapping UTF-8 JSON. Any
/// malformed input yields `None`; this function never panics and callers
/// must treat absence as "untrusted/unusable", not as a distinct error.
pub fn decode(token: &str) -> Option<Claims> {
    let mut segments = token.split('.');
    let (Some(_header), Some(payload), Some(_signature), None) = (
        segments.next(),
        segments.next(),
        segments.next(),
        segments.next(),
    ) else {
        TOKEN_DECODE_FAILURES.click();
        return None;
    };

    // Tokens in the wild vary on padding; the no-pad engine handles both
    // once trailing '=' is stripped.
    let bytes = match URL_SAFE_NO_PAD.decode(payload.trim_end_matches('=')) {
        Ok(bytes) => bytes,
        Err(_) => {
            TOKEN_DECODE_FAILURES.click();
            return None;
        }
    };

    match serde_json::from_slice::<Claims>(&bytes) {
        Ok(claims) => Some(claims),
        Err(_) => {
            TOKEN_DECODE_FAILURES.click();
            None
        }
    }
}
