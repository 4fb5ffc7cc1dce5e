//! Credential lifecycle management.

use tracing::{debug, info};

use vidpub_models::{ChannelKey, Credential};
use vidpub_youtube::OauthClient;

use crate::components::CredentialStore;
use crate::error::PublishResult;

/// Decides whether the channel's access token is usable and refreshes it
/// through the OAuth provider when it is not.
pub struct TokenManager<'a> {
    oauth: &'a OauthClient,
    store: &'a dyn CredentialStore,
}

impl<'a> TokenManager<'a> {
    pub fn new(oauth: &'a OauthClient, store: &'a dyn CredentialStore) -> Self {
        Self { oauth, store }
    }

    /// Return a credential whose access token is valid at `now_ms`.
    ///
    /// `now_ms` is sampled once by the caller and drives both the expiry
    /// check and the new expiry computation; re-sampling in between could
    /// admit a token that is valid at check time but expired at use.
    ///
    /// The still-valid path makes no network call. The refresh path makes
    /// exactly one refresh-grant call and persists the new token fields
    /// before returning; a failed refresh leaves the stored record
    /// untouched and fails the invocation.
    pub async fn ensure_valid(
        &self,
        key: &ChannelKey,
        credential: Credential,
        now_ms: i64,
    ) -> PublishResult<Credential> {
        if credential.is_valid_at(now_ms) {
            debug!(
                "Access token for channel {} valid until {:?}, no refresh needed",
                key,
                credential.expires_at()
            );
            return Ok(credential);
        }

        info!(
            "Access token for channel {} expired at {:?}, refreshing",
            key,
            credential.expires_at()
        );

        let grant = self.oauth.refresh(&credential.refresh_token).await?;

        let refreshed = Credential {
            access_token: grant.access_token,
            // A rotated refresh token is honored for the rest of this run;
            // the store write is fixed to the access-token fields.
            refresh_token: grant.refresh_token.unwrap_or(credential.refresh_token),
            token_type: grant.token_type.unwrap_or(credential.token_type),
            scope: grant.scope.unwrap_or(credential.scope),
            user_id: credential.user_id,
            issued_at_ms: now_ms,
            expires_at_ms: now_ms + grant.expires_in * 1000,
        };

        self.store.save_token(key, &refreshed).await?;

        info!(
            "Refreshed access token for channel {}, now valid until {:?}",
            key,
            refreshed.expires_at()
        );
        Ok(refreshed)
    }
}
