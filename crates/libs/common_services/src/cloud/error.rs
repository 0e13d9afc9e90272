use crate::database::CloudProvider;
use thiserror::Error;

/// Failures talking to a cloud storage provider. Timeouts surface through
/// `Transport` like any other network problem.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("provider request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("provider rejected the request: {0}")]
    Rejected(String),

    #[error("malformed provider response: {0}")]
    MalformedResponse(String),

    #[error("no OAuth client configured for {0}")]
    Misconfigured(CloudProvider),
}
