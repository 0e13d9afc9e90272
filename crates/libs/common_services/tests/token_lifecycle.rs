mod common;

use chrono::{Duration, Utc};
use common::{seed_credential, test_pool, token_service, tokens, FakeProvider};
use common_services::database::{CloudProvider, CredentialStore};
use std::sync::atomic::Ordering;

const USER: i64 = 7;
const PROVIDER: CloudProvider = CloudProvider::GoogleDrive;

#[tokio::test]
async fn absent_credential_yields_no_token() {
    let pool = test_pool().await;
    let fake = FakeProvider::new();
    let service = token_service(fake.clone());

    let token = service.get_valid_token(&pool, USER, PROVIDER).await.unwrap();
    assert_eq!(token, None);
    assert!(!service.is_connected(&pool, USER, PROVIDER).await.unwrap());
    assert_eq!(fake.refresh_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn exchange_then_get_returns_the_stored_token() {
    let pool = test_pool().await;
    let fake = FakeProvider::new();
    fake.set_exchange_response(Some(tokens("access-1", Some("refresh-1"), 3600)));
    let service = token_service(fake.clone());

    service
        .exchange_code(&pool, USER, PROVIDER, "auth-code")
        .await
        .unwrap();

    let token = service.get_valid_token(&pool, USER, PROVIDER).await.unwrap();
    assert_eq!(token.as_deref(), Some("access-1"));
    // Fresh token, no refresh traffic.
    assert_eq!(fake.refresh_calls.load(Ordering::SeqCst), 0);
    assert!(service.is_connected(&pool, USER, PROVIDER).await.unwrap());
}

#[tokio::test]
async fn exchange_failure_writes_nothing() {
    let pool = test_pool().await;
    let fake = FakeProvider::new();
    // No scripted response: the provider rejects the code.
    let service = token_service(fake.clone());

    let result = service
        .exchange_code(&pool, USER, PROVIDER, "bad-code")
        .await;
    assert!(result.is_err());

    let stored = CredentialStore::find(&pool, USER, PROVIDER).await.unwrap();
    assert!(stored.is_none());
}

#[tokio::test]
async fn expired_credential_triggers_exactly_one_refresh() {
    let pool = test_pool().await;
    let fake = FakeProvider::new();
    fake.set_refresh_response(Some(tokens("access-2", None, 3600)));
    let service = token_service(fake.clone());

    seed_credential(
        &pool,
        USER,
        "access-1",
        Some("refresh-1"),
        Utc::now() - Duration::hours(1),
    )
    .await;

    let token = service.get_valid_token(&pool, USER, PROVIDER).await.unwrap();
    assert_eq!(token.as_deref(), Some("access-2"));
    assert_eq!(fake.refresh_calls.load(Ordering::SeqCst), 1);

    // The refreshed credential was persisted before being handed out.
    let stored = CredentialStore::find(&pool, USER, PROVIDER)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.access_token, "access-2");
    assert!(stored.expires_at > Utc::now());

    // A second call within the new lifetime reads the store, no new traffic.
    let token = service.get_valid_token(&pool, USER, PROVIDER).await.unwrap();
    assert_eq!(token.as_deref(), Some("access-2"));
    assert_eq!(fake.refresh_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn refresh_keeps_the_old_refresh_token_unless_rotated() {
    let pool = test_pool().await;
    let fake = FakeProvider::new();
    fake.set_refresh_response(Some(tokens("access-2", None, 3600)));
    let service = token_service(fake.clone());

    seed_credential(
        &pool,
        USER,
        "access-1",
        Some("refresh-1"),
        Utc::now() - Duration::minutes(5),
    )
    .await;

    service.get_valid_token(&pool, USER, PROVIDER).await.unwrap();
    let stored = CredentialStore::find(&pool, USER, PROVIDER)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.refresh_token.as_deref(), Some("refresh-1"));

    // When the provider rotates the refresh token, the new one wins.
    fake.set_refresh_response(Some(tokens("access-3", Some("refresh-2"), 3600)));
    seed_credential(
        &pool,
        USER,
        "access-2",
        Some("refresh-1"),
        Utc::now() - Duration::minutes(5),
    )
    .await;
    service.get_valid_token(&pool, USER, PROVIDER).await.unwrap();
    let stored = CredentialStore::find(&pool, USER, PROVIDER)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.refresh_token.as_deref(), Some("refresh-2"));
}

#[tokio::test]
async fn failed_refresh_yields_absent_without_retrying() {
    let pool = test_pool().await;
    let fake = FakeProvider::new();
    // No scripted refresh response: every attempt fails.
    let service = token_service(fake.clone());

    seed_credential(
        &pool,
        USER,
        "access-1",
        Some("refresh-1"),
        Utc::now() - Duration::hours(2),
    )
    .await;

    let token = service.get_valid_token(&pool, USER, PROVIDER).await.unwrap();
    assert_eq!(token, None);
    assert_eq!(fake.refresh_calls.load(Ordering::SeqCst), 1);

    // Broken connection reads the same as never connected.
    assert!(!service.is_connected(&pool, USER, PROVIDER).await.unwrap());
}

#[tokio::test]
async fn expired_credential_without_refresh_token_yields_absent() {
    let pool = test_pool().await;
    let fake = FakeProvider::new();
    let service = token_service(fake.clone());

    seed_credential(&pool, USER, "access-1", None, Utc::now() - Duration::hours(1)).await;

    let token = service.get_valid_token(&pool, USER, PROVIDER).await.unwrap();
    assert_eq!(token, None);
    // Nothing to refresh with; the provider is never contacted.
    assert_eq!(fake.refresh_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn credential_writes_are_whole_row_upserts() {
    let pool = test_pool().await;
    let fake = FakeProvider::new();
    fake.set_exchange_response(Some(tokens("access-new", Some("refresh-new"), 7200)));
    let service = token_service(fake.clone());

    seed_credential(
        &pool,
        USER,
        "access-old",
        Some("refresh-old"),
        Utc::now() + Duration::hours(1),
    )
    .await;

    // Reconnecting replaces the credential in place.
    service
        .exchange_code(&pool, USER, PROVIDER, "auth-code")
        .await
        .unwrap();

    let row_count = sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM cloud_credential WHERE user_id = ?1",
    )
    .bind(USER)
    .fetch_one(&pool)
    .await
    .unwrap();
    assert_eq!(row_count, 1);

    let stored = CredentialStore::find(&pool, USER, PROVIDER)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.access_token, "access-new");
    assert_eq!(stored.refresh_token.as_deref(), Some("refresh-new"));
}

#[tokio::test]
async fn status_check_refreshes_as_a_side_effect() {
    let pool = test_pool().await;
    let fake = FakeProvider::new();
    fake.set_refresh_response(Some(tokens("access-2", None, 3600)));
    let service = token_service(fake.clone());

    seed_credential(
        &pool,
        USER,
        "access-1",
        Some("refresh-1"),
        Utc::now() - Duration::hours(1),
    )
    .await;

    assert!(service.is_connected(&pool, USER, PROVIDER).await.unwrap());
    assert_eq!(fake.refresh_calls.load(Ordering::SeqCst), 1);

    let stored = CredentialStore::find(&pool, USER, PROVIDER)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.access_token, "access-2");
}
