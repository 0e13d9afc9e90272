use crate::cloud::{ProviderError, ProviderRegistry, StorageProvider};
use crate::database::{CloudCredential, CloudProvider, CredentialStore, DbError};
use chrono::{DateTime, Duration, Utc};
use sqlx::SqlitePool;
use std::sync::Arc;
use thiserror::Error;
use tracing::{instrument, warn};

/// Assumed lifetime when the provider omits `expires_in`.
const DEFAULT_EXPIRES_IN_SECS: i64 = 3600;

#[derive(Debug, Error)]
pub enum TokenError {
    #[error(transparent)]
    Db(#[from] DbError),

    #[error("no implementation registered for provider {0}")]
    UnknownProvider(CloudProvider),

    #[error(transparent)]
    Provider(#[from] ProviderError),
}

/// Hands out currently-valid bearer tokens for cloud providers, refreshing
/// and persisting credentials as needed.
#[derive(Clone)]
pub struct TokenService {
    registry: Arc<ProviderRegistry>,
}

impl TokenService {
    #[must_use]
    pub fn new(registry: Arc<ProviderRegistry>) -> Self {
        Self { registry }
    }

    /// The storage implementation for a provider, for callers that need to
    /// move bytes rather than tokens.
    #[must_use]
    pub fn storage(&self, provider: CloudProvider) -> Option<Arc<dyn StorageProvider>> {
        self.registry.get(provider)
    }

    /// Returns a bearer token that is valid right now, or `None` when the
    /// user is not connected.
    ///
    /// A stored credential whose `expires_at` has passed triggers a single
    /// refresh attempt; the refreshed credential is persisted before the
    /// token is returned, so callers never observe a token the store does
    /// not hold. Refresh failure of any kind (no refresh token, transport
    /// error, provider rejection) yields `None`, indistinguishable from
    /// never having connected. Database errors propagate.
    #[instrument(skip(self, pool))]
    pub async fn get_valid_token(
        &self,
        pool: &SqlitePool,
        user_id: i64,
        provider: CloudProvider,
    ) -> Result<Option<String>, DbError> {
        let Some(credential) = CredentialStore::find(pool, user_id, provider).await? else {
            return Ok(None);
        };

        if credential.expires_at >= Utc::now() {
            return Ok(Some(credential.access_token));
        }

        // Expired: one refresh attempt, no retries. Concurrent refreshes for
        // the same user are tolerated; the upsert is last-writer-wins and a
        // superseded token stays usable until its own expiry.
        let Some(refresh_token) = credential.refresh_token else {
            warn!(user_id, %provider, "credential expired and no refresh token is stored");
            return Ok(None);
        };
        let Some(implementation) = self.registry.get(provider) else {
            warn!(%provider, "no implementation registered for stored provider");
            return Ok(None);
        };

        let tokens = match implementation.refresh(&refresh_token).await {
            Ok(tokens) => tokens,
            Err(err) => {
                warn!(user_id, %provider, "token refresh failed: {err}");
                return Ok(None);
            }
        };

        let refreshed = CloudCredential {
            user_id,
            provider,
            access_token: tokens.access_token,
            // Providers don't always rotate the refresh token; keep the old
            // one unless a new one was issued.
            refresh_token: tokens.refresh_token.or(Some(refresh_token)),
            expires_at: expiry_from_now(tokens.expires_in),
        };
        CredentialStore::upsert(pool, &refreshed).await?;

        Ok(Some(refreshed.access_token))
    }

    /// Performs the OAuth code exchange and stores the resulting credential.
    /// Nothing is written on failure.
    #[instrument(skip(self, pool, code))]
    pub async fn exchange_code(
        &self,
        pool: &SqlitePool,
        user_id: i64,
        provider: CloudProvider,
        code: &str,
    ) -> Result<(), TokenError> {
        let implementation = self
            .registry
            .get(provider)
            .ok_or(TokenError::UnknownProvider(provider))?;

        let tokens = implementation.exchange_code(code).await?;

        let credential = CloudCredential {
            user_id,
            provider,
            access_token: tokens.access_token,
            refresh_token: tokens.refresh_token,
            expires_at: expiry_from_now(tokens.expires_in),
        };
        CredentialStore::upsert(pool, &credential).await?;

        Ok(())
    }

    /// Whether a usable credential exists for (user, provider).
    ///
    /// Defined as `get_valid_token(..).is_some()`, so checking the status of
    /// an expired credential attempts a refresh and persists the result as
    /// a side effect.
    #[instrument(skip(self, pool))]
    pub async fn is_connected(
        &self,
        pool: &SqlitePool,
        user_id: i64,
        provider: CloudProvider,
    ) -> Result<bool, DbError> {
        Ok(self
            .get_valid_token(pool, user_id, provider)
            .await?
            .is_some())
    }
}

fn expiry_from_now(expires_in: Option<u64>) -> DateTime<Utc> {
    let secs = expires_in.map_or(DEFAULT_EXPIRES_IN_SECS, |s| {
        i64::try_from(s).unwrap_or(DEFAULT_EXPIRES_IN_SECS)
    });
    Utc::now() + Duration::seconds(secs)
}
