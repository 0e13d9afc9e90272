mod common;

use chrono::{Duration, Utc};
use common::{seed_credential, seed_media, test_pool, token_service, FakeProvider};
use common_services::api::media::error::MediaError;
use common_services::api::media::interfaces::GalleryParams;
use common_services::api::media::service::{
    delete_media, download_url, get_media, list_gallery, list_shared, set_album, upload_media,
    UploadMedia,
};
use common_services::api::sharing::service::share_media;
use common_services::database::MediaKind;
use app_state::StorageSettings;
use sqlx::SqlitePool;
use std::sync::atomic::Ordering;

const ALICE: i64 = 1;
const BOB: i64 = 2;
const CAROL: i64 = 3;

fn storage_settings() -> StorageSettings {
    StorageSettings {
        database_url: "sqlite::memory:".to_string(),
        thumbnail_root: std::env::temp_dir(),
        max_upload_bytes: 1024 * 1024,
    }
}

fn photo_upload(filename: &str) -> UploadMedia {
    UploadMedia {
        filename: filename.to_string(),
        mime_type: "image/jpeg".to_string(),
        bytes: vec![0u8; 128],
        caption: None,
        album_id: None,
    }
}

async fn media_count(pool: &SqlitePool) -> i64 {
    sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM media_item")
        .fetch_one(pool)
        .await
        .unwrap()
}

#[tokio::test]
async fn upload_requires_connected_cloud_storage() {
    let pool = test_pool().await;
    let fake = FakeProvider::new();
    let service = token_service(fake.clone());

    let err = upload_media(&pool, &service, &storage_settings(), ALICE, photo_upload("a.jpg"))
        .await
        .unwrap_err();
    assert!(matches!(err, MediaError::NotConnected));
    assert_eq!(media_count(&pool).await, 0);
    assert_eq!(fake.upload_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn upload_records_the_item_after_the_remote_store_confirms() {
    let pool = test_pool().await;
    let fake = FakeProvider::new();
    let service = token_service(fake.clone());
    seed_credential(&pool, ALICE, "token", None, Utc::now() + Duration::hours(1)).await;

    let item = upload_media(
        &pool,
        &service,
        &storage_settings(),
        ALICE,
        UploadMedia {
            caption: Some("At the beach".to_string()),
            ..photo_upload("beach.jpg")
        },
    )
    .await
    .unwrap();

    assert_eq!(item.owner_id, ALICE);
    assert_eq!(item.cloud_file_id, "remote-beach.jpg");
    assert_eq!(item.kind, MediaKind::Photo);
    assert_eq!(item.caption.as_deref(), Some("At the beach"));
    assert_eq!(fake.upload_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn failed_remote_upload_leaves_no_library_row() {
    let pool = test_pool().await;
    let fake = FakeProvider::new();
    fake.fail_uploads.store(true, Ordering::SeqCst);
    let service = token_service(fake.clone());
    seed_credential(&pool, ALICE, "token", None, Utc::now() + Duration::hours(1)).await;

    let err = upload_media(&pool, &service, &storage_settings(), ALICE, photo_upload("a.jpg"))
        .await
        .unwrap_err();
    assert!(matches!(err, MediaError::Provider(_)));
    assert_eq!(media_count(&pool).await, 0);
}

#[tokio::test]
async fn upload_validates_size_and_type_before_any_traffic() {
    let pool = test_pool().await;
    let fake = FakeProvider::new();
    let service = token_service(fake.clone());
    seed_credential(&pool, ALICE, "token", None, Utc::now() + Duration::hours(1)).await;

    let settings = StorageSettings {
        max_upload_bytes: 64,
        ..storage_settings()
    };
    let err = upload_media(&pool, &service, &settings, ALICE, photo_upload("big.jpg"))
        .await
        .unwrap_err();
    assert!(matches!(err, MediaError::PayloadTooLarge));

    let err = upload_media(
        &pool,
        &service,
        &storage_settings(),
        ALICE,
        UploadMedia {
            mime_type: "application/pdf".to_string(),
            ..photo_upload("report.pdf")
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, MediaError::UnsupportedMediaType));

    assert_eq!(fake.upload_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn get_media_distinguishes_missing_from_forbidden() {
    let pool = test_pool().await;
    let media = seed_media(&pool, ALICE, None).await;

    let err = get_media(&pool, "does-not-exist", ALICE).await.unwrap_err();
    assert!(matches!(err, MediaError::NotFound(_)));

    let err = get_media(&pool, &media.id, BOB).await.unwrap_err();
    assert!(matches!(err, MediaError::Forbidden(_)));

    share_media(&pool, &media.id, ALICE, BOB, true).await.unwrap();
    let fetched = get_media(&pool, &media.id, BOB).await.unwrap();
    assert_eq!(fetched.id, media.id);
}

#[tokio::test]
async fn gallery_pages_through_own_media_only() {
    let pool = test_pool().await;
    for _ in 0..3 {
        seed_media(&pool, ALICE, None).await;
    }
    seed_media(&pool, BOB, None).await;

    let params = GalleryParams {
        page: Some(1),
        per_page: Some(2),
    };
    let page = list_gallery(&pool, ALICE, &params).await.unwrap();
    assert_eq!(page.media.len(), 2);
    assert_eq!(page.total, 3);
    assert_eq!(page.pages, 2);

    let params = GalleryParams {
        page: Some(2),
        per_page: Some(2),
    };
    let page = list_gallery(&pool, ALICE, &params).await.unwrap();
    assert_eq!(page.media.len(), 1);
    assert!(page.media.iter().all(|m| m.owner_id == ALICE));
}

#[tokio::test]
async fn shared_listing_shows_items_granted_to_the_user() {
    let pool = test_pool().await;
    let media = seed_media(&pool, ALICE, None).await;
    seed_media(&pool, ALICE, None).await;

    assert!(list_shared(&pool, BOB).await.unwrap().is_empty());

    share_media(&pool, &media.id, ALICE, BOB, true).await.unwrap();
    let shared = list_shared(&pool, BOB).await.unwrap();
    assert_eq!(shared.len(), 1);
    assert_eq!(shared[0].id, media.id);
}

#[tokio::test]
async fn download_url_enforces_the_grant_download_flag() {
    let pool = test_pool().await;
    let fake = FakeProvider::new();
    let service = token_service(fake.clone());
    let media = seed_media(&pool, ALICE, None).await;
    seed_credential(&pool, ALICE, "owner-token", None, Utc::now() + Duration::hours(1)).await;

    // The owner always may download.
    let response = download_url(&pool, &service, &media.id, ALICE).await.unwrap();
    assert!(response.download_url.contains(&media.cloud_file_id));
    assert!(response.download_url.contains("owner-token"));

    // Unrelated user: no grant, no URL.
    let err = download_url(&pool, &service, &media.id, CAROL).await.unwrap_err();
    assert!(matches!(err, MediaError::Forbidden(_)));

    // Shared without download permission: view-only.
    share_media(&pool, &media.id, ALICE, BOB, false).await.unwrap();
    let err = download_url(&pool, &service, &media.id, BOB).await.unwrap_err();
    assert!(matches!(err, MediaError::Forbidden(_)));

    // Shared with download permission. The URL is minted with the owner's
    // credential, since the bytes live in the owner's account.
    let second = seed_media(&pool, ALICE, None).await;
    share_media(&pool, &second.id, ALICE, BOB, true).await.unwrap();
    let response = download_url(&pool, &service, &second.id, BOB).await.unwrap();
    assert!(response.download_url.contains("owner-token"));
}

#[tokio::test]
async fn delete_is_owner_only_and_cascades_grants_and_comments() {
    let pool = test_pool().await;
    let media = seed_media(&pool, ALICE, None).await;
    share_media(&pool, &media.id, ALICE, BOB, true).await.unwrap();
    common_services::api::comment::service::add_comment(&pool, &media.id, BOB, "Nice!")
        .await
        .unwrap();

    let err = delete_media(&pool, &storage_settings(), &media.id, BOB)
        .await
        .unwrap_err();
    assert!(matches!(err, MediaError::Forbidden(_)));

    delete_media(&pool, &storage_settings(), &media.id, ALICE)
        .await
        .unwrap();
    assert_eq!(media_count(&pool).await, 0);

    let grants = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM sharing_grant")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(grants, 0);
    let comments = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM comment")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(comments, 0);
}

#[tokio::test]
async fn media_moves_between_own_albums_only() {
    let pool = test_pool().await;
    let media = seed_media(&pool, ALICE, None).await;
    let own_album = common_services::api::album::service::create_album(&pool, ALICE, "Mine", None)
        .await
        .unwrap();
    let other_album = common_services::api::album::service::create_album(&pool, BOB, "Bob's", None)
        .await
        .unwrap();

    let item = set_album(&pool, &media.id, ALICE, Some(own_album.id.clone()))
        .await
        .unwrap();
    assert_eq!(item.album_id.as_deref(), Some(own_album.id.as_str()));

    let err = set_album(&pool, &media.id, ALICE, Some(other_album.id.clone()))
        .await
        .unwrap_err();
    assert!(matches!(err, MediaError::Forbidden(_)));

    let err = set_album(&pool, &media.id, BOB, None).await.unwrap_err();
    assert!(matches!(err, MediaError::Forbidden(_)));

    let item = set_album(&pool, &media.id, ALICE, None).await.unwrap();
    assert_eq!(item.album_id, None);
}
