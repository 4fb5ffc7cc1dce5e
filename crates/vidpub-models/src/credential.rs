//! Delegated OAuth credential record.

use std::fmt;

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// A channel's delegated OAuth2 token pair, as stored in the durable store.
///
/// The access token is short-lived; `expires_at_ms` is the absolute
/// millisecond-epoch instant it becomes invalid. The refresh token is
/// long-lived and must survive a failed refresh untouched.
#[derive(Clone, Serialize, Deserialize)]
pub struct Credential {
    /// Short-lived bearer token
    pub access_token: String,
    /// Long-lived refresh token
    pub refresh_token: String,
    /// Token type reported by the provider (normally "Bearer")
    pub token_type: String,
    /// Granted OAuth scopes
    pub scope: String,
    /// Platform user the grant was issued for
    pub user_id: String,
    /// When the current access token was issued (ms epoch)
    pub issued_at_ms: i64,
    /// When the current access token expires (ms epoch)
    pub expires_at_ms: i64,
}

impl Credential {
    /// Whether the access token is still usable at `now_ms`.
    ///
    /// Expiry exactly at `now_ms` counts as expired: refreshing eagerly at
    /// the boundary avoids a token that is valid at check time but expired
    /// by the time the upload call presents it.
    pub fn is_valid_at(&self, now_ms: i64) -> bool {
        self.expires_at_ms > now_ms
    }

    /// Expiry as a UTC instant, for diagnostics.
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_millis_opt(self.expires_at_ms).single()
    }
}

// Tokens must not end up in logs; keep Debug output to metadata only.
impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("token_type", &self.token_type)
            .field("scope", &self.scope)
            .field("user_id", &self.user_id)
            .field("issued_at_ms", &self.issued_at_ms)
            .field("expires_at_ms", &self.expires_at_ms)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn credential(expires_at_ms: i64) -> Credential {
        Credential {
            access_token: "ya29.test".into(),
            refresh_token: "1//refresh".into(),
            token_type: "Bearer".into(),
            scope: "https://www.googleapis.com/auth/youtube.upload".into(),
            user_id: "user-1".into(),
            issued_at_ms: 0,
            expires_at_ms,
        }
    }

    #[test]
    fn test_validity_boundary() {
        let now = 1_700_000_000_000;
        assert!(credential(now + 1).is_valid_at(now));
        // expiry exactly at "now" counts as expired
        assert!(!credential(now).is_valid_at(now));
        assert!(!credential(now - 1).is_valid_at(now));
    }

    #[test]
    fn test_debug_redacts_tokens() {
        let rendered = format!("{:?}", credential(0));
        assert!(!rendered.contains("ya29.test"));
        assert!(!rendered.contains("1//refresh"));
        assert!(rendered.contains("user-1"));
    }
}
