use crate::api::cloud::error::CloudApiError;
use crate::api::cloud::interfaces::{ConnectResponse, ConnectionStatus};
use crate::cloud::TokenService;
use crate::database::CloudProvider;
use crate::utils::nice_id;
use sqlx::SqlitePool;
use tracing::{info, instrument};

/// Builds the consent URL to start connecting a cloud account.
#[instrument(skip(tokens))]
pub fn connect_url(
    tokens: &TokenService,
    provider: CloudProvider,
) -> Result<ConnectResponse, CloudApiError> {
    let storage = tokens
        .storage(provider)
        .ok_or(CloudApiError::UnknownProvider)?;

    let state = nice_id(24);
    Ok(ConnectResponse {
        auth_url: storage.auth_url(&state),
        state,
    })
}

/// Completes the OAuth flow: trades the authorization code for tokens and
/// stores the credential.
#[instrument(skip(pool, tokens, code))]
pub async fn exchange_code(
    pool: &SqlitePool,
    tokens: &TokenService,
    user_id: i64,
    provider: CloudProvider,
    code: &str,
) -> Result<(), CloudApiError> {
    tokens.exchange_code(pool, user_id, provider, code).await?;
    info!(user_id, %provider, "connected cloud account");
    Ok(())
}

/// Current connection status. Checking an expired credential attempts a
/// refresh, so a `true` here means a token is available right now.
#[instrument(skip(pool, tokens))]
pub async fn connection_status(
    pool: &SqlitePool,
    tokens: &TokenService,
    user_id: i64,
    provider: CloudProvider,
) -> Result<ConnectionStatus, CloudApiError> {
    let connected = tokens.is_connected(pool, user_id, provider).await?;
    Ok(ConnectionStatus {
        provider,
        connected,
    })
}
