//! API integration tests.
//!
//! These tests drive the router with in-memory ports and a mock database.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode, header},
};
use forumpush_api::{AppState, router as api_router};
use forumpush_common::{AppResult, PushSettings};
use forumpush_core::{
    FilterChain, JobQueue, OnesignalSubscriptionService, PushClient, PushDispatcher, PushJob,
    PushRecipient, RecipientDirectory,
};
use forumpush_db::repositories::{ForumUserRepository, OnesignalSubscriptionRepository};
use sea_orm::{DatabaseBackend, DatabaseConnection, MockDatabase};
use serde_json::{Value, json};
use tower::ServiceExt;

/// Directory with one known user, alice (id 1), who has browser and
/// OneSignal subscriptions.
struct StaticDirectory;

#[async_trait]
impl RecipientDirectory for StaticDirectory {
    async fn find_recipient(&self, user_id: i64) -> AppResult<Option<PushRecipient>> {
        Ok((user_id == 1).then(|| PushRecipient {
            id: 1,
            username: "alice".to_string(),
            do_not_disturb: false,
        }))
    }

    async fn has_push_subscriptions(&self, _user_id: i64) -> AppResult<bool> {
        Ok(true)
    }

    async fn has_onesignal_subscriptions(&self, _user_id: i64) -> AppResult<bool> {
        Ok(true)
    }

    async fn push_clients(
        &self,
        _user_id: i64,
        _allowed_push_urls: &str,
    ) -> AppResult<Vec<PushClient>> {
        Ok(Vec::new())
    }
}

#[derive(Default)]
struct RecordingQueue {
    jobs: Mutex<Vec<PushJob>>,
}

#[async_trait]
impl JobQueue for RecordingQueue {
    async fn submit(&self, job: PushJob) -> AppResult<()> {
        self.jobs.lock().unwrap().push(job);
        Ok(())
    }
}

fn create_app(db: DatabaseConnection, queue: Arc<RecordingQueue>) -> Router {
    let db = Arc::new(db);
    let settings = PushSettings {
        onesignal_push_enabled: true,
        onesignal_app_id: "app".to_string(),
        onesignal_rest_api_key: "key".to_string(),
        ..PushSettings::default()
    };
    let directory: Arc<dyn RecipientDirectory> = Arc::new(StaticDirectory);

    let state = AppState {
        dispatcher: Arc::new(PushDispatcher::new(
            settings,
            FilterChain::new(),
            Arc::clone(&directory),
            queue,
        )),
        directory,
        onesignal_subscriptions: OnesignalSubscriptionService::new(
            ForumUserRepository::new(Arc::clone(&db)),
            OnesignalSubscriptionRepository::new(db),
        ),
    };

    api_router().with_state(state)
}

fn empty_db() -> DatabaseConnection {
    MockDatabase::new(DatabaseBackend::Postgres).into_connection()
}

fn json_request(method: &str, uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn dispatch_body(user_id: i64) -> Value {
    json!({
        "user_id": user_id,
        "payload": {
            "notification_type": 2,
            "username": "bob",
            "excerpt": "thanks!",
            "topic_title": "General Discussion",
            "post_url": "/t/general/5/2",
            "topic_id": 5,
            "post_number": 2
        }
    })
}

#[tokio::test]
async fn test_healthz() {
    let app = create_app(empty_db(), Arc::default());

    let response = app
        .oneshot(Request::builder().uri("/healthz").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert_eq!(&bytes[..], b"ok");
}

#[tokio::test]
async fn test_dispatch_queues_browser_and_onesignal_jobs() {
    let queue = Arc::new(RecordingQueue::default());
    let app = create_app(empty_db(), Arc::clone(&queue));

    let response = app
        .oneshot(json_request("POST", "/push/dispatch", &dispatch_body(1)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["data"]["outcome"]["status"], "dispatched");
    assert_eq!(
        body["data"]["outcome"]["jobs"],
        json!(["send_push_notification", "onesignal_pushnotification"])
    );

    let jobs = queue.jobs.lock().unwrap();
    assert_eq!(jobs.len(), 2);
    match &jobs[1] {
        PushJob::OnesignalPushNotification(job) => assert_eq!(job.username, "alice"),
        other => panic!("unexpected job {other:?}"),
    }
}

#[tokio::test]
async fn test_dispatch_unknown_user() {
    let queue = Arc::new(RecordingQueue::default());
    let app = create_app(empty_db(), Arc::clone(&queue));

    let response = app
        .oneshot(json_request("POST", "/push/dispatch", &dispatch_body(42)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(queue.jobs.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_dispatch_rejects_malformed_body() {
    let app = create_app(empty_db(), Arc::default());

    let response = app
        .oneshot(json_request("POST", "/push/dispatch", &json!({"user_id": 1})))
        .await
        .unwrap();

    assert!(response.status().is_client_error());
}

#[tokio::test]
async fn test_subscribe_validation_error() {
    let app = create_app(empty_db(), Arc::default());

    let response = app
        .oneshot(json_request(
            "POST",
            "/onesignal/subscriptions",
            &json!({"user_id": 1, "player_id": ""}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_unsubscribe_returns_no_content() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_exec_results([sea_orm::MockExecResult {
            last_insert_id: 0,
            rows_affected: 1,
        }])
        .into_connection();
    let app = create_app(db, Arc::default());

    let response = app
        .oneshot(json_request(
            "DELETE",
            "/onesignal/subscriptions",
            &json!({"user_id": 1, "player_id": "player-1"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}
