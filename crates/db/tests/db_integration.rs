//! Database integration tests.
//!
//! The ignored tests require a running `PostgreSQL` instance with the forum
//! schema (`users` table) present.
//! Run with: `TEST_DATABASE_URL=postgres://... cargo test --test db_integration -- --ignored`

#![allow(clippy::unwrap_used)]

use std::sync::Arc;

use forumpush_db::entities::{ForumUser, OnesignalSubscription, UserApiKey, UserApiKeyScope};
use forumpush_db::migrations::Migrator;
use forumpush_db::repositories::OnesignalSubscriptionRepository;
use sea_orm::{Database, EntityName};
use sea_orm_migration::MigratorTrait;

#[test]
fn test_table_names_match_forum_schema() {
    assert_eq!(ForumUser.table_name(), "users");
    assert_eq!(OnesignalSubscription.table_name(), "onesignal_subscriptions");
    assert_eq!(UserApiKey.table_name(), "user_api_keys");
    assert_eq!(UserApiKeyScope.table_name(), "user_api_key_scopes");
}

#[test]
fn test_migrator_owns_only_subscription_table() {
    assert_eq!(Migrator::migrations().len(), 1);
}

#[tokio::test]
#[ignore = "requires running PostgreSQL instance"]
async fn test_subscribe_roundtrip() {
    let url = std::env::var("TEST_DATABASE_URL").unwrap();
    let db = Database::connect(&url).await.unwrap();
    forumpush_db::migrate(&db).await.unwrap();

    let repo = OnesignalSubscriptionRepository::new(Arc::new(db));
    let user_id = 1;

    let first = repo.subscribe(user_id, "integration-player").await.unwrap();
    let second = repo.subscribe(user_id, "integration-player").await.unwrap();
    assert_eq!(first.id, second.id);
    assert!(repo.exists_for_user(user_id).await.unwrap());

    assert_eq!(repo.unsubscribe(user_id, "integration-player").await.unwrap(), 1);
}
