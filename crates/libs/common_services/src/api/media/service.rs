use crate::access;
use crate::api::media::error::MediaError;
use crate::api::media::interfaces::{DownloadUrlResponse, GalleryPage, GalleryParams};
use crate::cloud::TokenService;
use crate::database::{
    AlbumStore, CloudProvider, CreateMediaItem, MediaItem, MediaKind, MediaStore, SharingStore,
};
use crate::utils::nice_id;
use app_state::{StorageSettings, MEDIA_ITEM_ID_LENGTH};
use chrono::{DateTime, NaiveDateTime, Utc};
use sqlx::SqlitePool;
use std::io::Cursor;
use tracing::{info, instrument, warn};

/// Mirror of what the clients are allowed to send.
const ALLOWED_MIME_TYPES: &[&str] = &[
    "image/jpeg",
    "image/jpg",
    "image/png",
    "image/gif",
    "image/webp",
    "video/mp4",
    "video/quicktime",
    "video/x-msvideo",
    "video/webm",
];

/// Everything a client sends along with the file bytes.
#[derive(Debug)]
pub struct UploadMedia {
    pub filename: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
    pub caption: Option<String>,
    pub album_id: Option<String>,
}

/// Uploads a file to the user's cloud storage and records it in the library.
///
/// The library row is created only after the provider confirmed the upload;
/// a failed upload leaves no trace.
#[instrument(skip(pool, tokens, settings, upload), fields(filename = %upload.filename, size_bytes = upload.bytes.len()))]
pub async fn upload_media(
    pool: &SqlitePool,
    tokens: &TokenService,
    settings: &StorageSettings,
    user_id: i64,
    upload: UploadMedia,
) -> Result<MediaItem, MediaError> {
    if upload.bytes.len() > settings.max_upload_bytes {
        return Err(MediaError::PayloadTooLarge);
    }
    if !ALLOWED_MIME_TYPES.contains(&upload.mime_type.as_str()) {
        return Err(MediaError::UnsupportedMediaType);
    }
    let kind = if upload.mime_type.starts_with("image/") {
        MediaKind::Photo
    } else {
        MediaKind::Video
    };

    if let Some(album_id) = &upload.album_id {
        match AlbumStore::find_owner_by_id(pool, album_id).await? {
            None => {
                return Err(MediaError::BadRequest(format!(
                    "Album {album_id} does not exist."
                )))
            }
            Some(owner) if owner != user_id => {
                return Err(MediaError::Forbidden(
                    "Media can only be uploaded into your own albums.".to_string(),
                ))
            }
            Some(_) => {}
        }
    }

    let provider = CloudProvider::GoogleDrive;
    let Some(access_token) = tokens.get_valid_token(pool, user_id, provider).await? else {
        return Err(MediaError::NotConnected);
    };
    let storage = tokens
        .storage(provider)
        .ok_or_else(|| MediaError::Provider(format!("no implementation for {provider}")))?;

    let captured_at = match kind {
        MediaKind::Photo => captured_at_from_exif(&upload.bytes),
        MediaKind::Video => None,
    };
    let size_bytes = upload.bytes.len() as i64;

    let cloud_file_id = storage
        .upload(
            &access_token,
            &upload.filename,
            &upload.mime_type,
            upload.bytes,
        )
        .await?;

    let id = nice_id(MEDIA_ITEM_ID_LENGTH);
    let item = MediaStore::create(
        pool,
        &id,
        &CreateMediaItem {
            owner_id: user_id,
            cloud_provider: provider,
            cloud_file_id,
            filename: upload.filename,
            kind,
            size_bytes,
            thumbnail_path: None,
            captured_at,
            album_id: upload.album_id,
            caption: upload.caption,
        },
    )
    .await?;
    info!(media_item_id = %item.id, "stored uploaded media item");

    Ok(item)
}

/// Fetch one media item the user may see.
#[instrument(skip(pool))]
pub async fn get_media(
    pool: &SqlitePool,
    media_item_id: &str,
    user_id: i64,
) -> Result<MediaItem, MediaError> {
    let Some(item) = MediaStore::find_by_id(pool, media_item_id).await? else {
        return Err(MediaError::NotFound(media_item_id.to_string()));
    };
    if !access::can_access_media(pool, media_item_id, user_id).await? {
        return Err(MediaError::Forbidden(
            "You do not have access to this media item.".to_string(),
        ));
    }
    Ok(item)
}

/// A page of the user's own media.
#[instrument(skip(pool))]
pub async fn list_gallery(
    pool: &SqlitePool,
    user_id: i64,
    params: &GalleryParams,
) -> Result<GalleryPage, MediaError> {
    let per_page = i64::from(params.per_page.unwrap_or(20).clamp(1, 100));
    let page = i64::from(params.page.unwrap_or(1).max(1));

    let media = MediaStore::list_by_owner(pool, user_id, per_page, (page - 1) * per_page).await?;
    let total = MediaStore::count_by_owner(pool, user_id).await?;

    Ok(GalleryPage {
        media,
        total,
        pages: (total + per_page - 1) / per_page,
    })
}

/// Media that other users have shared with this user.
#[instrument(skip(pool))]
pub async fn list_shared(pool: &SqlitePool, user_id: i64) -> Result<Vec<MediaItem>, MediaError> {
    Ok(MediaStore::list_shared_with(pool, user_id).await?)
}

/// Deletes a media item. Owner only; grants and comments cascade, and the
/// thumbnail file is removed best-effort.
#[instrument(skip(pool, settings))]
pub async fn delete_media(
    pool: &SqlitePool,
    settings: &StorageSettings,
    media_item_id: &str,
    user_id: i64,
) -> Result<(), MediaError> {
    let Some(owner_id) = MediaStore::find_owner_by_id(pool, media_item_id).await? else {
        return Err(MediaError::NotFound(media_item_id.to_string()));
    };
    if owner_id != user_id {
        return Err(MediaError::Forbidden(
            "Only the owner can delete media.".to_string(),
        ));
    }

    let thumbnail = MediaStore::delete(pool, media_item_id).await?.flatten();
    if let Some(thumbnail) = thumbnail {
        let path = settings.thumbnail_root.join(&thumbnail);
        if let Err(err) = tokio::fs::remove_file(&path).await {
            warn!("Could not remove thumbnail {}: {err}", path.display());
        }
    }

    Ok(())
}

/// Mints a direct download URL. Non-owners need a grant with download
/// permission; the URL is produced with the *owner's* credential, since the
/// bytes live in the owner's cloud account.
#[instrument(skip(pool, tokens))]
pub async fn download_url(
    pool: &SqlitePool,
    tokens: &TokenService,
    media_item_id: &str,
    user_id: i64,
) -> Result<DownloadUrlResponse, MediaError> {
    let Some(item) = MediaStore::find_by_id(pool, media_item_id).await? else {
        return Err(MediaError::NotFound(media_item_id.to_string()));
    };
    if item.owner_id != user_id {
        let Some(grant) = SharingStore::find_grant(pool, media_item_id, user_id).await? else {
            return Err(MediaError::Forbidden(
                "You do not have access to this media item.".to_string(),
            ));
        };
        if !grant.can_download {
            return Err(MediaError::Forbidden(
                "This item was shared without download permission.".to_string(),
            ));
        }
    }

    let Some(access_token) = tokens
        .get_valid_token(pool, item.owner_id, item.cloud_provider)
        .await?
    else {
        return Err(MediaError::NotConnected);
    };
    let storage = tokens.storage(item.cloud_provider).ok_or_else(|| {
        MediaError::Provider(format!("no implementation for {}", item.cloud_provider))
    })?;

    Ok(DownloadUrlResponse {
        download_url: storage.download_url(&access_token, &item.cloud_file_id),
        expires_in: 3600,
    })
}

/// Moves a media item into an album (or out of any album). Owner only, and
/// only into the owner's own albums.
#[instrument(skip(pool))]
pub async fn set_album(
    pool: &SqlitePool,
    media_item_id: &str,
    user_id: i64,
    album_id: Option<String>,
) -> Result<MediaItem, MediaError> {
    let Some(owner_id) = MediaStore::find_owner_by_id(pool, media_item_id).await? else {
        return Err(MediaError::NotFound(media_item_id.to_string()));
    };
    if owner_id != user_id {
        return Err(MediaError::Forbidden(
            "Only the owner can organize media.".to_string(),
        ));
    }

    if let Some(album_id) = &album_id {
        match AlbumStore::find_owner_by_id(pool, album_id).await? {
            None => {
                return Err(MediaError::BadRequest(format!(
                    "Album {album_id} does not exist."
                )))
            }
            Some(owner) if owner != user_id => {
                return Err(MediaError::Forbidden(
                    "Media can only be placed in your own albums.".to_string(),
                ))
            }
            Some(_) => {}
        }
    }

    MediaStore::set_album(pool, media_item_id, album_id.as_deref()).await?;
    MediaStore::find_by_id(pool, media_item_id)
        .await?
        .ok_or_else(|| MediaError::NotFound(media_item_id.to_string()))
}

/// Capture timestamp from embedded EXIF data, when present and parseable.
fn captured_at_from_exif(bytes: &[u8]) -> Option<DateTime<Utc>> {
    let mut cursor = Cursor::new(bytes);
    let exif = exif::Reader::new().read_from_container(&mut cursor).ok()?;
    let field = exif.get_field(exif::Tag::DateTimeOriginal, exif::In::PRIMARY)?;
    let raw = match &field.value {
        exif::Value::Ascii(values) => String::from_utf8_lossy(values.first()?).into_owned(),
        _ => return None,
    };
    let naive = NaiveDateTime::parse_from_str(raw.trim(), "%Y:%m:%d %H:%M:%S").ok()?;
    Some(naive.and_utc())
}
