//! OAuth2 refresh-token grant client.
//!
//! Initial consent happens out-of-band; this worker only ever exercises the
//! refresh-token grant path of the token endpoint.

use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::error::{YoutubeError, YoutubeResult};

/// Google's OAuth2 token endpoint.
pub const GOOGLE_TOKEN_URL: &str = "https://oauth2.googleapis.com/token";

/// Configuration for the OAuth client.
#[derive(Debug, Clone)]
pub struct OauthConfig {
    /// Token endpoint URL
    pub token_url: String,
    /// OAuth client id
    pub client_id: String,
    /// OAuth client secret
    pub client_secret: String,
    /// Request timeout
    pub timeout: Duration,
}

/// A successful refresh-grant response.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenGrant {
    /// Fresh short-lived access token
    pub access_token: String,
    /// Reported lifetime in seconds
    pub expires_in: i64,
    /// Present only when the provider rotates the refresh token
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub scope: Option<String>,
    #[serde(default)]
    pub token_type: Option<String>,
}

/// Client for the provider's token endpoint.
pub struct OauthClient {
    http: Client,
    config: OauthConfig,
}

impl OauthClient {
    /// Create a new OAuth client.
    pub fn new(config: OauthConfig) -> YoutubeResult<Self> {
        let http = Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("vidpub/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| YoutubeError::refresh_failed(e.to_string()))?;

        Ok(Self { http, config })
    }

    /// Exchange a refresh token for a fresh access token.
    ///
    /// One attempt, no retry: the caller owns at-most-one-attempt semantics
    /// for the whole invocation.
    pub async fn refresh(&self, refresh_token: &str) -> YoutubeResult<TokenGrant> {
        debug!("Requesting refresh grant from {}", self.config.token_url);

        let params = [
            ("client_id", self.config.client_id.as_str()),
            ("client_secret", self.config.client_secret.as_str()),
            ("refresh_token", refresh_token),
            ("grant_type", "refresh_token"),
        ];

        let response = self
            .http
            .post(&self.config.token_url)
            .form(&params)
            .send()
            .await
            .map_err(|e| YoutubeError::refresh_failed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(YoutubeError::refresh_failed(format!(
                "token endpoint returned {status}: {body}"
            )));
        }

        let grant: TokenGrant = response
            .json()
            .await
            .map_err(|e| YoutubeError::refresh_failed(format!("invalid grant response: {e}")))?;

        debug!("Refresh grant issued, valid for {}s", grant.expires_in);
        Ok(grant)
    }
}
