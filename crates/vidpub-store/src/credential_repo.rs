//! Repository for channel credential records.

use tracing::debug;

use vidpub_models::{ChannelKey, Credential};

use crate::attr::{self, Item};
use crate::client::StoreClient;
use crate::error::{StoreError, StoreResult};

/// Update expression for persisting a refreshed token. Names exactly the
/// token fields; everything else on the record belongs to other processes.
const UPDATE_TOKEN_EXPR: &str =
    "SET accessToken = :at, tokenExpiryDate = :expiry, tokenIssuedAt = :issuedAt";

/// Repository for a channel's delegated OAuth credential record.
#[derive(Clone)]
pub struct CredentialRepository {
    client: StoreClient,
}

impl CredentialRepository {
    pub fn new(client: StoreClient) -> Self {
        Self { client }
    }

    /// Point lookup of a channel's credential. `Ok(None)` means no record.
    pub async fn get(&self, key: &ChannelKey) -> StoreResult<Option<Credential>> {
        debug!("Loading credential for channel {}", key);

        let output = self
            .client
            .inner()
            .get_item()
            .table_name(self.client.table())
            .key("PK", attr::s(key.partition_key()))
            .key("SK", attr::s(key.sort_key()))
            .send()
            .await
            .map_err(|e| StoreError::read_failed(e.to_string()))?;

        match output.item {
            Some(item) => Ok(Some(credential_from_item(&item)?)),
            None => Ok(None),
        }
    }

    /// Persist a refreshed access token.
    ///
    /// Targeted update of the token fields only; the refresh token and any
    /// unrelated attributes on the record are left untouched.
    pub async fn update_token(
        &self,
        key: &ChannelKey,
        credential: &Credential,
    ) -> StoreResult<()> {
        self.client
            .inner()
            .update_item()
            .table_name(self.client.table())
            .key("PK", attr::s(key.partition_key()))
            .key("SK", attr::s(key.sort_key()))
            .update_expression(UPDATE_TOKEN_EXPR)
            .expression_attribute_values(":at", attr::s(&credential.access_token))
            .expression_attribute_values(":expiry", attr::n(credential.expires_at_ms))
            .expression_attribute_values(":issuedAt", attr::n(credential.issued_at_ms))
            .send()
            .await
            .map_err(|e| StoreError::write_failed(e.to_string()))?;

        debug!("Persisted refreshed token for channel {}", key);
        Ok(())
    }
}

fn credential_from_item(item: &Item) -> StoreResult<Credential> {
    Ok(Credential {
        access_token: attr::req_s(item, "credential", "accessToken")?,
        refresh_token: attr::req_s(item, "credential", "refreshToken")?,
        token_type: attr::opt_s(item, "tokenType").unwrap_or_else(|| "Bearer".to_string()),
        scope: attr::opt_s(item, "scope").unwrap_or_default(),
        user_id: attr::opt_s(item, "userId").unwrap_or_default(),
        issued_at_ms: attr::opt_n_i64(item, "tokenIssuedAt").unwrap_or(0),
        expires_at_ms: attr::req_n_i64(item, "credential", "tokenExpiryDate")?,
    })
}
