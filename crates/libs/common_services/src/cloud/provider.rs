use crate::cloud::ProviderError;
use crate::database::CloudProvider;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Tokens returned by a provider after code exchange or refresh.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenSet {
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub expires_in: Option<u64>,
}

/// Everything the rest of the system needs from a cloud storage backend.
///
/// Implementations own the provider-specific OAuth quirks and wire formats;
/// callers stay provider-agnostic and select an implementation through the
/// [`ProviderRegistry`](crate::cloud::ProviderRegistry) by the provider
/// stored on the credential or media row.
#[async_trait]
pub trait StorageProvider: Send + Sync {
    fn provider(&self) -> CloudProvider;

    /// The consent URL the user should be redirected to. `state` is an
    /// opaque string echoed back by the provider for CSRF protection.
    fn auth_url(&self, state: &str) -> String;

    /// Exchange an authorization code for tokens.
    async fn exchange_code(&self, code: &str) -> Result<TokenSet, ProviderError>;

    /// Trade a refresh token for a fresh access token.
    async fn refresh(&self, refresh_token: &str) -> Result<TokenSet, ProviderError>;

    /// Store a file remotely, returning the provider's file id.
    async fn upload(
        &self,
        access_token: &str,
        filename: &str,
        mime_type: &str,
        bytes: Vec<u8>,
    ) -> Result<String, ProviderError>;

    /// A direct download URL for a stored file, valid as long as the access
    /// token is.
    fn download_url(&self, access_token: &str, file_id: &str) -> String;
}
