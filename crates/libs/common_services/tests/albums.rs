mod common;

use common::{seed_media, test_pool};
use common_services::api::album::error::AlbumError;
use common_services::api::album::service::{
    create_album, delete_album, get_album_details, list_albums, update_album,
};
use common_services::api::sharing::service::share_media;
use common_services::database::{AlbumStore, MediaStore};

const ALICE: i64 = 1;
const BOB: i64 = 2;
const CAROL: i64 = 3;

#[tokio::test]
async fn create_and_list_albums() {
    let pool = test_pool().await;
    let album = create_album(&pool, ALICE, "Summer 2024", Some("Lake trip"))
        .await
        .unwrap();
    seed_media(&pool, ALICE, Some(&album.id)).await;
    seed_media(&pool, ALICE, Some(&album.id)).await;
    create_album(&pool, BOB, "Bob's", None).await.unwrap();

    let albums = list_albums(&pool, ALICE).await.unwrap();
    assert_eq!(albums.len(), 1);
    assert_eq!(albums[0].name, "Summer 2024");
    assert_eq!(albums[0].media_count, 2);

    let err = create_album(&pool, ALICE, "   ", None).await.unwrap_err();
    assert!(matches!(err, AlbumError::BadRequest(_)));
}

#[tokio::test]
async fn album_details_filter_members_to_what_the_viewer_may_see() {
    let pool = test_pool().await;
    let album = create_album(&pool, ALICE, "Holiday", None).await.unwrap();
    let m1 = seed_media(&pool, ALICE, Some(&album.id)).await;
    seed_media(&pool, ALICE, Some(&album.id)).await;

    // Owner sees every member.
    let details = get_album_details(&pool, &album.id, ALICE).await.unwrap();
    assert_eq!(details.media_items.len(), 2);

    // A user with one shared member sees the album, but only that member.
    share_media(&pool, &m1.id, ALICE, BOB, true).await.unwrap();
    let details = get_album_details(&pool, &album.id, BOB).await.unwrap();
    assert_eq!(details.media_items.len(), 1);
    assert_eq!(details.media_items[0].id, m1.id);

    // No shared member at all: the album exists but stays hidden.
    let err = get_album_details(&pool, &album.id, CAROL).await.unwrap_err();
    assert!(matches!(err, AlbumError::Forbidden(_)));

    let err = get_album_details(&pool, "does-not-exist", ALICE)
        .await
        .unwrap_err();
    assert!(matches!(err, AlbumError::NotFound(_)));
}

#[tokio::test]
async fn update_is_owner_only_and_covers_must_be_members() {
    let pool = test_pool().await;
    let album = create_album(&pool, ALICE, "Old name", None).await.unwrap();
    let member = seed_media(&pool, ALICE, Some(&album.id)).await;
    let outsider = seed_media(&pool, ALICE, None).await;

    let err = update_album(&pool, &album.id, BOB, Some("Hijacked".to_string()), None, None)
        .await
        .unwrap_err();
    assert!(matches!(err, AlbumError::Forbidden(_)));

    let err = update_album(&pool, &album.id, ALICE, None, None, Some(outsider.id.clone()))
        .await
        .unwrap_err();
    assert!(matches!(err, AlbumError::BadRequest(_)));

    let updated = update_album(
        &pool,
        &album.id,
        ALICE,
        Some("New name".to_string()),
        Some("With cover".to_string()),
        Some(member.id.clone()),
    )
    .await
    .unwrap();
    assert_eq!(updated.name, "New name");
    assert_eq!(updated.description.as_deref(), Some("With cover"));
    assert_eq!(updated.cover_media_id.as_deref(), Some(member.id.as_str()));
}

#[tokio::test]
async fn deleting_the_cover_media_clears_the_reference() {
    let pool = test_pool().await;
    let album = create_album(&pool, ALICE, "Covered", None).await.unwrap();
    let member = seed_media(&pool, ALICE, Some(&album.id)).await;
    update_album(&pool, &album.id, ALICE, None, None, Some(member.id.clone()))
        .await
        .unwrap();

    MediaStore::delete(&pool, &member.id).await.unwrap();

    let album = AlbumStore::find_by_id(&pool, &album.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(album.cover_media_id, None);
}

#[tokio::test]
async fn deleting_an_album_disassociates_members_without_deleting_them() {
    let pool = test_pool().await;
    let album = create_album(&pool, ALICE, "Short-lived", None).await.unwrap();
    let m1 = seed_media(&pool, ALICE, Some(&album.id)).await;
    let m2 = seed_media(&pool, ALICE, Some(&album.id)).await;

    let err = delete_album(&pool, &album.id, BOB).await.unwrap_err();
    assert!(matches!(err, AlbumError::Forbidden(_)));

    delete_album(&pool, &album.id, ALICE).await.unwrap();

    assert!(AlbumStore::find_by_id(&pool, &album.id)
        .await
        .unwrap()
        .is_none());
    for id in [&m1.id, &m2.id] {
        let media = MediaStore::find_by_id(&pool, id).await.unwrap().unwrap();
        assert_eq!(media.album_id, None);
    }
}
