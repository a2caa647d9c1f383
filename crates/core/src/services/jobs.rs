//! Delivery job descriptors and the queue port they are submitted through.
//!
//! Each job has a fixed name shared with the forum's job runner:
//!
//! | name                         | runner      |
//! |------------------------------|-------------|
//! | `send_push_notification`     | forum       |
//! | `onesignal_pushnotification` | forumpush   |
//! | `push_notification`          | forum       |

#![allow(missing_docs)]

use async_trait::async_trait;
use forumpush_common::AppResult;
use serde::{Deserialize, Serialize};

use crate::services::payload::NotificationPayload;
use crate::services::recipient::PushClient;

/// Browser push delivery, run by the forum.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SendPushNotificationJob {
    pub user_id: i64,
    pub payload: NotificationPayload,
}

impl SendPushNotificationJob {
    /// Job name.
    pub const NAME: &'static str = "send_push_notification";
}

/// OneSignal delivery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OnesignalPushJob {
    pub payload: NotificationPayload,
    /// Target username, matched against the `username` device tag.
    pub username: String,
}

impl OnesignalPushJob {
    /// Job name.
    pub const NAME: &'static str = "onesignal_pushnotification";
}

/// Delivery to user API clients, run by the forum.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientPushJob {
    pub clients: Vec<PushClient>,
    pub payload: NotificationPayload,
    pub user_id: i64,
}

impl ClientPushJob {
    /// Job name.
    pub const NAME: &'static str = "push_notification";
}

/// A deferred delivery, carrying its own copy of the payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "job", rename_all = "snake_case")]
pub enum PushJob {
    SendPushNotification(SendPushNotificationJob),
    OnesignalPushNotification(OnesignalPushJob),
    ClientPush(ClientPushJob),
}

impl PushJob {
    /// Name the job is queued under.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::SendPushNotification(_) => SendPushNotificationJob::NAME,
            Self::OnesignalPushNotification(_) => OnesignalPushJob::NAME,
            Self::ClientPush(_) => ClientPushJob::NAME,
        }
    }
}

/// Queue port used by the dispatch gate.
///
/// This allows dispatch to enqueue work without depending on the queue
/// implementation. Submission must not wait for the job to run.
#[async_trait]
pub trait JobQueue: Send + Sync {
    /// Submit a job for asynchronous execution.
    async fn submit(&self, job: PushJob) -> AppResult<()>;
}
