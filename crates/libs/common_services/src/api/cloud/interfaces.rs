use crate::database::CloudProvider;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ConnectResponse {
    /// Consent URL the client should send the user to.
    pub auth_url: String,
    /// Echoed back by the provider; clients must round-trip it unchanged.
    pub state: String,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ExchangeCodeRequest {
    /// Authorization code from the provider's redirect.
    pub code: String,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionStatus {
    pub provider: CloudProvider,
    pub connected: bool,
}
