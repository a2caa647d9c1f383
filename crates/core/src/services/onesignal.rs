//! OneSignal delivery.
//!
//! Builds the vendor request for a [`OnesignalPushJob`] and posts it once.
//! There is no retry: every outcome is terminal and only logged.

use forumpush_common::{AppError, AppResult, OnesignalConfig, PushSettings};
use reqwest::Client;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use serde::Serialize;
use tracing::{error, info};
use url::Url;

use crate::services::jobs::OnesignalPushJob;
use crate::services::payload::TitleCatalog;

/// Content type the vendor expects.
const JSON_CONTENT_TYPE: &str = "application/json;charset=utf-8";

/// Text keyed by language; only English is sent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LocalizedText {
    pub en: String,
}

/// Extra data delivered to the app with the notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NotificationData {
    pub discourse_url: String,
}

/// Device tag filter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagFilter {
    pub field: &'static str,
    pub key: &'static str,
    pub relation: &'static str,
    pub value: String,
}

impl TagFilter {
    /// Target devices tagged with the given username.
    #[must_use]
    pub fn username(username: &str) -> Self {
        Self {
            field: "tag",
            key: "username",
            relation: "=",
            value: username.to_string(),
        }
    }
}

/// Request body for the notifications endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OnesignalNotification {
    pub app_id: String,
    pub contents: LocalizedText,
    pub headings: LocalizedText,
    pub data: NotificationData,
    #[serde(rename = "ios_badgeType")]
    pub ios_badge_type: &'static str,
    #[serde(rename = "ios_badgeCount")]
    pub ios_badge_count: &'static str,
    pub filters: Vec<TagFilter>,
}

/// Terminal outcome of one delivery attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeliveryOutcome {
    /// The vendor answered 2xx.
    Sent,
    /// The vendor answered with a non-success status.
    Rejected {
        /// HTTP status code
        status: u16,
        /// Response body
        body: String,
    },
    /// The request never got a response.
    Failed {
        /// Transport error
        error: String,
    },
}

impl DeliveryOutcome {
    /// Whether the vendor accepted the notification.
    #[must_use]
    pub const fn is_sent(&self) -> bool {
        matches!(self, Self::Sent)
    }
}

/// OneSignal REST client.
#[derive(Clone)]
pub struct OnesignalClient {
    http_client: Client,
    api_url: Url,
    app_id: String,
    rest_api_key: String,
    titles: TitleCatalog,
}

impl OnesignalClient {
    /// Create a new client from site settings and client configuration.
    pub fn new(settings: &PushSettings, config: &OnesignalConfig) -> AppResult<Self> {
        let api_url = Url::parse(&config.api_url)
            .map_err(|e| AppError::Config(format!("Invalid OneSignal API URL: {e}")))?;

        let http_client = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            http_client,
            api_url,
            app_id: settings.onesignal_app_id.clone(),
            rest_api_key: settings.onesignal_rest_api_key.clone(),
            titles: TitleCatalog::with_overrides(&config.titles),
        })
    }

    /// Endpoint notifications are posted to.
    #[must_use]
    pub fn api_url(&self) -> &str {
        self.api_url.as_str()
    }

    /// Build the request body for a job.
    #[must_use]
    pub fn build_notification(&self, job: &OnesignalPushJob) -> OnesignalNotification {
        let payload = &job.payload;

        OnesignalNotification {
            app_id: self.app_id.clone(),
            contents: LocalizedText {
                en: format!("{}: {}", payload.username, payload.excerpt),
            },
            headings: LocalizedText {
                en: self.titles.heading(payload),
            },
            data: NotificationData {
                discourse_url: payload.post_url.clone(),
            },
            ios_badge_type: "Increase",
            ios_badge_count: "1",
            filters: vec![TagFilter::username(&job.username)],
        }
    }

    /// Post the notification for a job and log the outcome.
    ///
    /// Success logs once at info level; any failure logs once at error
    /// level with the request and response details.
    pub async fn deliver(&self, job: &OnesignalPushJob) -> DeliveryOutcome {
        let notification = self.build_notification(job);
        let body = match serde_json::to_string(&notification) {
            Ok(body) => body,
            Err(e) => {
                error!(username = %job.username, error = %e, "Failed to serialize OneSignal request");
                return DeliveryOutcome::Failed {
                    error: e.to_string(),
                };
            }
        };

        let result = self
            .http_client
            .post(self.api_url.clone())
            .header(CONTENT_TYPE, JSON_CONTENT_TYPE)
            .header(AUTHORIZATION, format!("Basic {}", self.rest_api_key))
            .body(body.clone())
            .send()
            .await;

        match result {
            Ok(response) if response.status().is_success() => {
                info!(
                    username = %job.username,
                    "Push notification sent via OneSignal to {}.",
                    job.username
                );
                DeliveryOutcome::Sent
            }
            Ok(response) => {
                let status = response.status().as_u16();
                let response_body = response.text().await.unwrap_or_default();
                error!(
                    username = %job.username,
                    url = %self.api_url,
                    request = %body,
                    status,
                    response = %response_body,
                    "OneSignal error when sending a push notification"
                );
                DeliveryOutcome::Rejected {
                    status,
                    body: response_body,
                }
            }
            Err(e) => {
                error!(
                    username = %job.username,
                    url = %self.api_url,
                    request = %body,
                    error = %e,
                    "OneSignal error when sending a push notification"
                );
                DeliveryOutcome::Failed {
                    error: e.to_string(),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::payload::{NotificationPayload, NotificationType};
    use serde_json::json;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tracing::Level;
    use tracing_subscriber::layer::{Context, SubscriberExt};
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    /// Counts info and error events emitted by this crate.
    #[derive(Clone, Default)]
    struct LevelCounter {
        info: Arc<AtomicUsize>,
        error: Arc<AtomicUsize>,
    }

    impl<S: tracing::Subscriber> tracing_subscriber::Layer<S> for LevelCounter {
        fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
            if !event.metadata().target().starts_with("forumpush_core") {
                return;
            }
            match *event.metadata().level() {
                Level::INFO => {
                    self.info.fetch_add(1, Ordering::SeqCst);
                }
                Level::ERROR => {
                    self.error.fetch_add(1, Ordering::SeqCst);
                }
                _ => {}
            }
        }
    }

    fn settings() -> PushSettings {
        PushSettings {
            onesignal_push_enabled: true,
            onesignal_app_id: "app-123".to_string(),
            onesignal_rest_api_key: "rest-key".to_string(),
            ..PushSettings::default()
        }
    }

    fn client(api_url: String) -> OnesignalClient {
        let config = OnesignalConfig {
            api_url,
            ..OnesignalConfig::default()
        };
        OnesignalClient::new(&settings(), &config).unwrap()
    }

    fn job(notification_type: NotificationType, topic_title: &str) -> OnesignalPushJob {
        OnesignalPushJob {
            payload: NotificationPayload {
                notification_type,
                username: "bob".to_string(),
                excerpt: "hi".to_string(),
                topic_title: topic_title.to_string(),
                post_url: "/t/1".to_string(),
                topic_id: None,
                post_number: None,
            },
            username: "alice".to_string(),
        }
    }

    fn expected_body(heading: &str) -> serde_json::Value {
        json!({
            "app_id": "app-123",
            "contents": {"en": "bob: hi"},
            "headings": {"en": heading},
            "data": {"discourse_url": "/t/1"},
            "ios_badgeType": "Increase",
            "ios_badgeCount": "1",
            "filters": [
                {"field": "tag", "key": "username", "relation": "=", "value": "alice"}
            ]
        })
    }

    #[test]
    fn test_request_body_shape() {
        let client = client("https://onesignal.test/api/v1/notifications".to_string());
        let notification = client.build_notification(&job(NotificationType::Replied, "General Discussion"));

        assert_eq!(
            serde_json::to_value(&notification).unwrap(),
            expected_body("General Discussion")
        );
    }

    #[test]
    fn test_chat_message_heading() {
        let client = client("https://onesignal.test/api/v1/notifications".to_string());
        let notification = client.build_notification(&job(NotificationType::ChatMessage, "Ignored"));

        assert_eq!(notification.headings.en, "New chat message");
    }

    #[test]
    fn test_rejects_invalid_api_url() {
        let config = OnesignalConfig {
            api_url: "not a url".to_string(),
            ..OnesignalConfig::default()
        };

        let result = OnesignalClient::new(&settings(), &config);
        assert!(matches!(result, Err(AppError::Config(_))));
    }

    #[tokio::test]
    async fn test_success_logs_one_info() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/v1/notifications"))
            .and(header("Authorization", "Basic rest-key"))
            .and(header("Content-Type", JSON_CONTENT_TYPE))
            .and(body_json(expected_body("Notification")))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "n-1", "recipients": 1})))
            .expect(1)
            .mount(&server)
            .await;

        let counter = LevelCounter::default();
        let _guard = tracing::subscriber::set_default(
            tracing_subscriber::registry().with(counter.clone()),
        );

        let client = client(format!("{}/api/v1/notifications", server.uri()));
        let outcome = client.deliver(&job(NotificationType::Other(999), "")).await;

        assert_eq!(outcome, DeliveryOutcome::Sent);
        assert_eq!(counter.info.load(Ordering::SeqCst), 1);
        assert_eq!(counter.error.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_server_error_logs_one_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/v1/notifications"))
            .respond_with(ResponseTemplate::new(500).set_body_string("upstream failure"))
            .expect(1)
            .mount(&server)
            .await;

        let counter = LevelCounter::default();
        let _guard = tracing::subscriber::set_default(
            tracing_subscriber::registry().with(counter.clone()),
        );

        let client = client(format!("{}/api/v1/notifications", server.uri()));
        let outcome = client.deliver(&job(NotificationType::Mentioned, "Welcome")).await;

        assert_eq!(
            outcome,
            DeliveryOutcome::Rejected {
                status: 500,
                body: "upstream failure".to_string()
            }
        );
        assert_eq!(counter.info.load(Ordering::SeqCst), 0);
        assert_eq!(counter.error.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_transport_error_logs_one_error() {
        let counter = LevelCounter::default();
        let _guard = tracing::subscriber::set_default(
            tracing_subscriber::registry().with(counter.clone()),
        );

        // Nothing listens on port 1
        let client = client("http://127.0.0.1:1/api/v1/notifications".to_string());
        let outcome = client.deliver(&job(NotificationType::Mentioned, "Welcome")).await;

        assert!(matches!(outcome, DeliveryOutcome::Failed { .. }));
        assert!(!outcome.is_sent());
        assert_eq!(counter.info.load(Ordering::SeqCst), 0);
        assert_eq!(counter.error.load(Ordering::SeqCst), 1);
    }
}
