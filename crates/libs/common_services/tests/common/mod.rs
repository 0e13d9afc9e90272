#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use common_services::cloud::{
    ProviderError, ProviderRegistry, StorageProvider, TokenService, TokenSet,
};
use common_services::database::{
    migrate, CloudCredential, CloudProvider, CreateMediaItem, CredentialStore, MediaItem,
    MediaKind, MediaStore,
};
use common_services::utils::nice_id;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Fresh in-memory database with the full schema applied.
pub async fn test_pool() -> SqlitePool {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")
        .expect("valid connect string")
        .foreign_keys(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await
        .expect("in-memory database");
    migrate(&pool).await.expect("schema");
    pool
}

pub async fn seed_media(pool: &SqlitePool, owner_id: i64, album_id: Option<&str>) -> MediaItem {
    let id = nice_id(16);
    MediaStore::create(
        pool,
        &id,
        &CreateMediaItem {
            owner_id,
            cloud_provider: CloudProvider::GoogleDrive,
            cloud_file_id: format!("drive-{id}"),
            filename: format!("{id}.jpg"),
            kind: MediaKind::Photo,
            size_bytes: 1024,
            thumbnail_path: None,
            captured_at: None,
            album_id: album_id.map(ToOwned::to_owned),
            caption: None,
        },
    )
    .await
    .expect("seed media item")
}

pub async fn seed_credential(
    pool: &SqlitePool,
    user_id: i64,
    access_token: &str,
    refresh_token: Option<&str>,
    expires_at: DateTime<Utc>,
) {
    CredentialStore::upsert(
        pool,
        &CloudCredential {
            user_id,
            provider: CloudProvider::GoogleDrive,
            access_token: access_token.to_string(),
            refresh_token: refresh_token.map(ToOwned::to_owned),
            expires_at,
        },
    )
    .await
    .expect("seed credential");
}

/// In-memory provider with scripted responses and call counters.
pub struct FakeProvider {
    pub exchange_calls: AtomicUsize,
    pub refresh_calls: AtomicUsize,
    pub upload_calls: AtomicUsize,
    /// `None` makes the next exchange fail.
    pub exchange_response: Mutex<Option<TokenSet>>,
    /// `None` makes the next refresh fail.
    pub refresh_response: Mutex<Option<TokenSet>>,
    pub fail_uploads: AtomicBool,
}

impl FakeProvider {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            exchange_calls: AtomicUsize::new(0),
            refresh_calls: AtomicUsize::new(0),
            upload_calls: AtomicUsize::new(0),
            exchange_response: Mutex::new(None),
            refresh_response: Mutex::new(None),
            fail_uploads: AtomicBool::new(false),
        })
    }

    pub fn set_exchange_response(&self, tokens: Option<TokenSet>) {
        *self.exchange_response.lock().unwrap() = tokens;
    }

    pub fn set_refresh_response(&self, tokens: Option<TokenSet>) {
        *self.refresh_response.lock().unwrap() = tokens;
    }
}

pub fn tokens(access_token: &str, refresh_token: Option<&str>, expires_in: u64) -> TokenSet {
    TokenSet {
        access_token: access_token.to_string(),
        refresh_token: refresh_token.map(ToOwned::to_owned),
        expires_in: Some(expires_in),
    }
}

#[async_trait]
impl StorageProvider for FakeProvider {
    fn provider(&self) -> CloudProvider {
        CloudProvider::GoogleDrive
    }

    fn auth_url(&self, state: &str) -> String {
        format!("https://provider.test/auth?state={state}")
    }

    async fn exchange_code(&self, _code: &str) -> Result<TokenSet, ProviderError> {
        self.exchange_calls.fetch_add(1, Ordering::SeqCst);
        self.exchange_response
            .lock()
            .unwrap()
            .clone()
            .ok_or_else(|| ProviderError::Rejected("invalid code".to_string()))
    }

    async fn refresh(&self, _refresh_token: &str) -> Result<TokenSet, ProviderError> {
        self.refresh_calls.fetch_add(1, Ordering::SeqCst);
        self.refresh_response
            .lock()
            .unwrap()
            .clone()
            .ok_or_else(|| ProviderError::Rejected("invalid refresh token".to_string()))
    }

    async fn upload(
        &self,
        _access_token: &str,
        filename: &str,
        _mime_type: &str,
        _bytes: Vec<u8>,
    ) -> Result<String, ProviderError> {
        self.upload_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_uploads.load(Ordering::SeqCst) {
            return Err(ProviderError::Rejected("upload failed".to_string()));
        }
        Ok(format!("remote-{filename}"))
    }

    fn download_url(&self, access_token: &str, file_id: &str) -> String {
        format!("https://provider.test/files/{file_id}?token={access_token}")
    }
}

pub fn token_service(fake: Arc<FakeProvider>) -> TokenService {
    let mut registry = ProviderRegistry::new();
    registry.register(fake);
    TokenService::new(Arc::new(registry))
}
