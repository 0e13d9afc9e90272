use crate::api_state::ApiContext;
use crate::routes::auth::middleware::ApiUser;
use axum::extract::{Path, State};
use axum::{Extension, Json};
use common_services::api::cloud::error::CloudApiError;
use common_services::api::cloud::interfaces::{
    ConnectResponse, ConnectionStatus, ExchangeCodeRequest,
};
use common_services::api::cloud::service::{connect_url, connection_status, exchange_code};
use common_services::database::CloudProvider;

/// Start connecting a cloud storage account.
///
/// Returns the provider's consent URL; the client sends the user there and
/// posts the resulting code to the exchange endpoint.
#[utoipa::path(
    get,
    path = "/cloud/{provider}/connect",
    tag = "Cloud",
    params(
        ("provider" = CloudProvider, Path, description = "Cloud storage provider.")
    ),
    responses(
        (status = 200, description = "Consent URL to redirect the user to.", body = ConnectResponse),
        (status = 404, description = "Unknown provider."),
    ),
    security(("bearer_auth" = []))
)]
pub async fn connect_cloud_handler(
    State(context): State<ApiContext>,
    Extension(_user): Extension<ApiUser>,
    Path(provider): Path<CloudProvider>,
) -> Result<Json<ConnectResponse>, CloudApiError> {
    let response = connect_url(&context.tokens, provider)?;
    Ok(Json(response))
}

/// Complete the OAuth flow with the authorization code from the redirect.
#[utoipa::path(
    post,
    path = "/cloud/{provider}/exchange",
    tag = "Cloud",
    params(
        ("provider" = CloudProvider, Path, description = "Cloud storage provider.")
    ),
    request_body = ExchangeCodeRequest,
    responses(
        (status = 204, description = "Account connected; credential stored."),
        (status = 404, description = "Unknown provider."),
        (status = 502, description = "The provider rejected the code."),
        (status = 503, description = "Provider is not configured on this server."),
    ),
    security(("bearer_auth" = []))
)]
pub async fn exchange_code_handler(
    State(context): State<ApiContext>,
    Extension(user): Extension<ApiUser>,
    Path(provider): Path<CloudProvider>,
    Json(payload): Json<ExchangeCodeRequest>,
) -> Result<axum::http::StatusCode, CloudApiError> {
    exchange_code(
        &context.pool,
        &context.tokens,
        user.id,
        provider,
        &payload.code,
    )
    .await?;
    Ok(axum::http::StatusCode::NO_CONTENT)
}

/// Whether the user's cloud account currently yields a usable token.
///
/// An expired credential is refreshed (and persisted) as part of this check.
#[utoipa::path(
    get,
    path = "/cloud/{provider}/status",
    tag = "Cloud",
    params(
        ("provider" = CloudProvider, Path, description = "Cloud storage provider.")
    ),
    responses(
        (status = 200, description = "Connection status.", body = ConnectionStatus),
    ),
    security(("bearer_auth" = []))
)]
pub async fn cloud_status_handler(
    State(context): State<ApiContext>,
    Extension(user): Extension<ApiUser>,
    Path(provider): Path<CloudProvider>,
) -> Result<Json<ConnectionStatus>, CloudApiError> {
    let status = connection_status(&context.pool, &context.tokens, user.id, provider).await?;
    Ok(Json(status))
}
