use crate::cloud::{ProviderError, StorageProvider, TokenSet};
use crate::database::CloudProvider;
use crate::utils::nice_id;
use app_state::GoogleSettings;
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;

const AUTH_ENDPOINT: &str = "https://accounts.google.com/o/oauth2/v2/auth";
const TOKEN_ENDPOINT: &str = "https://oauth2.googleapis.com/token";
const FILES_ENDPOINT: &str = "https://www.googleapis.com/drive/v3/files";
const UPLOAD_ENDPOINT: &str =
    "https://www.googleapis.com/upload/drive/v3/files?uploadType=multipart";
const DRIVE_SCOPE: &str = "https://www.googleapis.com/auth/drive.file";

/// All uploads are parented under this folder in the user's Drive.
const GALLERY_FOLDER: &str = "FamilyGallery";
const FOLDER_MIME_TYPE: &str = "application/vnd.google-apps.folder";

/// Google Drive storage backend.
///
/// Token lifetime is one hour; refresh works as long as the consent used
/// `access_type=offline`. Google only returns a new refresh token on the
/// initial consent, not on refresh.
pub struct GoogleDriveProvider {
    settings: GoogleSettings,
    /// Client for token exchange and refresh; short timeout.
    token_http: reqwest::Client,
    /// Client for file transfers; uploads can legitimately take a while.
    transfer_http: reqwest::Client,
}

#[derive(Debug, Deserialize)]
struct GoogleTokenResponse {
    access_token: String,
    refresh_token: Option<String>,
    expires_in: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct DriveFile {
    id: String,
}

#[derive(Debug, Deserialize)]
struct DriveFileList {
    #[serde(default)]
    files: Vec<DriveFile>,
}

impl GoogleDriveProvider {
    pub fn new(
        settings: GoogleSettings,
        token_timeout: Duration,
        transfer_timeout: Duration,
    ) -> Result<Self, ProviderError> {
        Ok(Self {
            settings,
            token_http: reqwest::Client::builder().timeout(token_timeout).build()?,
            transfer_http: reqwest::Client::builder()
                .timeout(transfer_timeout)
                .build()?,
        })
    }

    /// Token calls are never attempted without a configured OAuth client.
    fn require_client_config(&self) -> Result<(), ProviderError> {
        if self.settings.client_id.is_empty() || self.settings.client_secret.is_empty() {
            return Err(ProviderError::Misconfigured(CloudProvider::GoogleDrive));
        }
        Ok(())
    }

    async fn request_tokens(&self, form: &[(&str, &str)]) -> Result<TokenSet, ProviderError> {
        let response = self
            .token_http
            .post(TOKEN_ENDPOINT)
            .form(form)
            .send()
            .await?;

        if !response.status().is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::Rejected(body));
        }

        let tokens: GoogleTokenResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::MalformedResponse(e.to_string()))?;

        Ok(TokenSet {
            access_token: tokens.access_token,
            refresh_token: tokens.refresh_token,
            expires_in: tokens.expires_in,
        })
    }

    /// Finds the gallery folder, creating it on first use.
    async fn get_or_create_folder(&self, access_token: &str) -> Result<String, ProviderError> {
        let query = format!(
            "name='{GALLERY_FOLDER}' and mimeType='{FOLDER_MIME_TYPE}' and trashed=false"
        );
        let response = self
            .transfer_http
            .get(FILES_ENDPOINT)
            .query(&[("q", query.as_str())])
            .bearer_auth(access_token)
            .send()
            .await?;

        if response.status().is_success() {
            let listing: DriveFileList = response
                .json()
                .await
                .map_err(|e| ProviderError::MalformedResponse(e.to_string()))?;
            if let Some(folder) = listing.files.into_iter().next() {
                return Ok(folder.id);
            }
        }

        let response = self
            .transfer_http
            .post(FILES_ENDPOINT)
            .bearer_auth(access_token)
            .json(&serde_json::json!({
                "name": GALLERY_FOLDER,
                "mimeType": FOLDER_MIME_TYPE,
            }))
            .send()
            .await?;

        if !response.status().is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::Rejected(body));
        }

        let folder: DriveFile = response
            .json()
            .await
            .map_err(|e| ProviderError::MalformedResponse(e.to_string()))?;
        Ok(folder.id)
    }
}

#[async_trait]
impl StorageProvider for GoogleDriveProvider {
    fn provider(&self) -> CloudProvider {
        CloudProvider::GoogleDrive
    }

    fn auth_url(&self, state: &str) -> String {
        let query = url::form_urlencoded::Serializer::new(String::new())
            .append_pair("client_id", &self.settings.client_id)
            .append_pair("redirect_uri", &self.settings.redirect_uri)
            .append_pair("response_type", "code")
            .append_pair("scope", DRIVE_SCOPE)
            .append_pair("access_type", "offline")
            .append_pair("prompt", "consent")
            .append_pair("state", state)
            .finish();
        format!("{AUTH_ENDPOINT}?{query}")
    }

    async fn exchange_code(&self, code: &str) -> Result<TokenSet, ProviderError> {
        self.require_client_config()?;
        self.request_tokens(&[
            ("code", code),
            ("client_id", &self.settings.client_id),
            ("client_secret", &self.settings.client_secret),
            ("redirect_uri", &self.settings.redirect_uri),
            ("grant_type", "authorization_code"),
        ])
        .await
    }

    async fn refresh(&self, refresh_token: &str) -> Result<TokenSet, ProviderError> {
        self.require_client_config()?;
        self.request_tokens(&[
            ("refresh_token", refresh_token),
            ("client_id", &self.settings.client_id),
            ("client_secret", &self.settings.client_secret),
            ("grant_type", "refresh_token"),
        ])
        .await
    }

    async fn upload(
        &self,
        access_token: &str,
        filename: &str,
        mime_type: &str,
        bytes: Vec<u8>,
    ) -> Result<String, ProviderError> {
        let folder_id = self.get_or_create_folder(access_token).await?;

        // multipart/related: a JSON metadata part followed by the raw bytes.
        let boundary = nice_id(32);
        let metadata = serde_json::json!({
            "name": filename,
            "parents": [folder_id],
        })
        .to_string();

        let mut body = Vec::with_capacity(bytes.len() + metadata.len() + 256);
        body.extend_from_slice(format!("--{boundary}\r\n").as_bytes());
        body.extend_from_slice(b"Content-Type: application/json; charset=UTF-8\r\n\r\n");
        body.extend_from_slice(metadata.as_bytes());
        body.extend_from_slice(format!("\r\n--{boundary}\r\n").as_bytes());
        body.extend_from_slice(format!("Content-Type: {mime_type}\r\n\r\n").as_bytes());
        body.extend_from_slice(&bytes);
        body.extend_from_slice(format!("\r\n--{boundary}--").as_bytes());

        let response = self
            .transfer_http
            .post(UPLOAD_ENDPOINT)
            .bearer_auth(access_token)
            .header(
                reqwest::header::CONTENT_TYPE,
                format!("multipart/related; boundary={boundary}"),
            )
            .body(body)
            .send()
            .await?;

        if !response.status().is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::Rejected(body));
        }

        let file: DriveFile = response
            .json()
            .await
            .map_err(|e| ProviderError::MalformedResponse(e.to_string()))?;
        Ok(file.id)
    }

    fn download_url(&self, access_token: &str, file_id: &str) -> String {
        format!("{FILES_ENDPOINT}/{file_id}?alt=media&access_token={access_token}")
    }
}
