use chrono::{DateTime, TimeDelta, Utc};

use crate::types::TokenResponse;

/// Seconds subtracted from the reported lifetime so a token is refreshed
/// before upstream starts rejecting it.
pub const EXPIRY_SAFETY_MARGIN_SECS: i64 = 60;

/// Upper bound applied to the lifetime reported by upstream.
pub const MAX_TOKEN_LIFETIME_SECS: i64 = 24 * 60 * 60;

/// In-memory token store. Lost on restart.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TokenState {
    pub access_token: Option<String>,
    pub refresh_token: Option<String>,
    /// `None` until a token was obtained, and after an invalidation.
    pub expires_at: Option<DateTime<Utc>>,
}

impl TokenState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Access token usable without refresh at `now`.
    pub fn valid_access_token(&self, now: DateTime<Utc>) -> Option<&str> {
        match (&self.access_token, self.expires_at) {
            (Some(token), Some(expires_at)) if now < expires_at => Some(token.as_str()),
            _ => None,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.access_token.is_some() || self.refresh_token.is_some()
    }

    /// Stores a token endpoint response obtained at `now`.
    ///
    /// The previous refresh token is kept unless the response carries a new one.
    pub fn apply(&mut self, response: TokenResponse, now: DateTime<Utc>) {
        self.access_token = Some(response.access_token);
        if let Some(refresh) = response.refresh_token.filter(|r| !r.is_empty()) {
            self.refresh_token = Some(refresh);
        }
        self.expires_at = Some(expiry_from(now, response.expires_in));
    }

    /// Marks the access token as stale if it is still `token`.
    ///
    /// Returns whether anything changed. A token that was replaced in the
    /// meantime is left alone.
    pub fn invalidate(&mut self, token: &str) -> bool {
        if self.access_token.as_deref() != Some(token) {
            return false;
        }
        self.expires_at = None;
        true
    }
}

/// `now + expires_in - margin`, with the lifetime clamped to
/// `[0, MAX_TOKEN_LIFETIME_SECS]`. Falls back to `now` (stale) if the
/// instant is not representable.
fn expiry_from(now: DateTime<Utc>, expires_in: i64) -> DateTime<Utc> {
    let lifetime = expires_in
        .clamp(0, MAX_TOKEN_LIFETIME_SECS)
        .saturating_sub(EXPIRY_SAFETY_MARGIN_SECS);

    TimeDelta::try_seconds(lifetime)
        .and_then(|delta| now.checked_add_signed(delta))
        .unwrap_or(now)
}
