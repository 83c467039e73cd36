//! Locally-derived session state.
//!
//! A [`Session`] is the client's belief about who is logged in and until
//! when. It is recomputed from the stored token on every check and never
//! cached, because expiry is time-dependent.

use crate::claims;
use crate::observability::EXPIRED_TOKENS_CLEARED;
use crate::token_store::TokenStore;
use crate::utils::time::now_unix_ms;

/// The current user as derived from the stored token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    /// Username, taken from the token's `sub` claim.
    pub username: String,

    /// Expiry in epoch milliseconds, when the token carries an `exp` claim.
    pub expires_at_ms: Option<i64>,
}

fn session_from_token(token: &str) -> Option<Session> {
    let claims = claims::decode(token)?;
    let username = claims.sub.filter(|sub| !sub.is_empty())?;
    Some(Session {
        username,
        expires_at_ms: claims.exp.map(|exp| exp.saturating_mul(1000)),
    })
}

/// Returns the current user, or `None` when no usable token is stored.
///
/// `None` covers three cases with identical handling: no token stored, a
/// token that fails to decode, and decoded claims without a non-empty
/// `sub`.
pub fn current_user(store: &dyn TokenStore) -> Option<Session> {
    let token = store.get()?;
    session_from_token(&token)
}

/// Returns true when the token should be treated as expired.
///
/// True on decode failure and when `exp * 1000 <= now`. A token that
/// decodes but carries no `exp` claim is also treated as expired; this
/// conservative default is distinct from "no token at all" and is relied
/// upon by the page guards.
pub fn is_expired(token: &str) -> bool {
    is_expired_at(token, now_unix_ms())
}

fn is_expired_at(token: &str, now_ms: i64) -> bool {
    match claims::decode(token).and_then(|claims| claims.exp) {
        Some(exp) => exp.saturating_mul(1000) <= now_ms,
        None => true,
    }
}

/// The guard flow for authenticated surfaces.
///
/// No token means unauthenticated. A stored-but-expired token is cleared
/// and likewise treated as unauthenticated. Otherwise the derived session
/// is returned.
pub fn authenticated(store: &dyn TokenStore) -> Option<Session> {
    let token = store.get()?;
    if is_expired(&token) {
        EXPIRED_TOKENS_CLEARED.click();
        store.clear();
        return None;
    }
    session_from_token(&token)
}
