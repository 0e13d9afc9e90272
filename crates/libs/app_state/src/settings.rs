use serde::Deserialize;
use std::path::PathBuf;

#[derive(Debug, Deserialize, Clone)]
pub struct AppSettings {
    pub api: ApiSettings,
    pub storage: StorageSettings,
    pub cloud: CloudSettings,
    pub secrets: SecretSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ApiSettings {
    pub host: String,
    pub port: u16,
    pub public_url: String,
    pub allowed_origins: Vec<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StorageSettings {
    pub database_url: String,
    pub thumbnail_root: PathBuf,
    pub max_upload_bytes: usize,
}

#[derive(Debug, Deserialize, Clone)]
pub struct CloudSettings {
    /// Ceiling for token exchange and refresh calls, in seconds.
    pub token_timeout_secs: u64,
    /// Ceiling for file uploads and downloads, in seconds.
    pub transfer_timeout_secs: u64,
    pub google: GoogleSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct GoogleSettings {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_uri: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SecretSettings {
    pub jwt: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingSettings {
    pub filter: String,
}
