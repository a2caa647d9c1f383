//! Push dispatch gate.
//!
//! Decides whether and how a forum notification is pushed. Dispatch never
//! delivers anything itself: it only performs lookups and hands
//! [`PushJob`]s to the injected [`JobQueue`].

use std::sync::Arc;

use async_trait::async_trait;
use forumpush_common::PushSettings;
use serde::Serialize;
use tracing::{debug, warn};

use crate::services::jobs::{
    ClientPushJob, JobQueue, OnesignalPushJob, PushJob, SendPushNotificationJob,
};
use crate::services::payload::NotificationPayload;
use crate::services::push_filter::FilterChain;
use crate::services::recipient::{PushRecipient, RecipientDirectory};

/// Result of a dispatch, for logging and the inbound API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DispatchOutcome {
    /// The recipient is in do-not-disturb.
    Suppressed,
    /// A filter vetoed delivery.
    Vetoed {
        /// Name of the vetoing filter
        filter: String,
    },
    /// Zero or more jobs were queued.
    Dispatched {
        /// Names of the queued jobs, in submission order
        jobs: Vec<&'static str>,
    },
}

impl DispatchOutcome {
    /// Number of jobs queued.
    #[must_use]
    pub fn queued(&self) -> usize {
        match self {
            Self::Dispatched { jobs } => jobs.len(),
            Self::Suppressed | Self::Vetoed { .. } => 0,
        }
    }
}

/// Entry point called by the forum's notification pipeline.
#[async_trait]
pub trait NotificationDispatcher: Send + Sync {
    /// Dispatch a notification to a recipient.
    ///
    /// Failures are logged, never returned: the caller cannot act on them.
    async fn dispatch(
        &self,
        recipient: &PushRecipient,
        payload: &NotificationPayload,
    ) -> DispatchOutcome;
}

/// Dispatcher fanning out to browser push, OneSignal and user API clients.
#[derive(Clone)]
pub struct PushDispatcher {
    settings: Arc<PushSettings>,
    filters: FilterChain,
    directory: Arc<dyn RecipientDirectory>,
    queue: Arc<dyn JobQueue>,
}

impl PushDispatcher {
    /// Create a new push dispatcher.
    #[must_use]
    pub fn new(
        settings: PushSettings,
        filters: FilterChain,
        directory: Arc<dyn RecipientDirectory>,
        queue: Arc<dyn JobQueue>,
    ) -> Self {
        Self {
            settings: Arc::new(settings),
            filters,
            directory,
            queue,
        }
    }

    fn warn_missing_credentials(&self) {
        if !self.settings.has_app_id() {
            warn!("OneSignal App ID is missing");
        }
        if !self.settings.has_rest_api_key() {
            warn!("OneSignal REST API Key is missing");
        }
    }

    async fn enqueue(&self, job: PushJob, queued: &mut Vec<&'static str>) {
        let name = job.name();
        match self.queue.submit(job).await {
            Ok(()) => {
                debug!(job = name, "Queued push job");
                queued.push(name);
            }
            Err(e) => {
                warn!(job = name, error = %e, "Failed to queue push job");
            }
        }
    }

    async fn dispatch_browser_push(
        &self,
        recipient: &PushRecipient,
        payload: &NotificationPayload,
        queued: &mut Vec<&'static str>,
    ) {
        match self.directory.has_push_subscriptions(recipient.id).await {
            Ok(true) => {
                let job = SendPushNotificationJob {
                    user_id: recipient.id,
                    payload: payload.clone(),
                };
                self.enqueue(PushJob::SendPushNotification(job), queued).await;
            }
            Ok(false) => {}
            Err(e) => {
                warn!(user_id = recipient.id, error = %e, "Failed to look up push subscriptions");
            }
        }
    }

    async fn dispatch_onesignal(
        &self,
        recipient: &PushRecipient,
        payload: &NotificationPayload,
        queued: &mut Vec<&'static str>,
    ) {
        if !self.settings.onesignal_push_enabled {
            return;
        }

        match self.directory.has_onesignal_subscriptions(recipient.id).await {
            Ok(true) => {
                let job = OnesignalPushJob {
                    payload: payload.clone(),
                    username: recipient.username.clone(),
                };
                self.enqueue(PushJob::OnesignalPushNotification(job), queued)
                    .await;
            }
            Ok(false) => {}
            Err(e) => {
                warn!(
                    user_id = recipient.id,
                    error = %e,
                    "Failed to look up OneSignal subscriptions"
                );
            }
        }
    }

    async fn dispatch_api_clients(
        &self,
        recipient: &PushRecipient,
        payload: &NotificationPayload,
        queued: &mut Vec<&'static str>,
    ) {
        if !self.settings.user_api_push_enabled() {
            return;
        }

        let clients = match self
            .directory
            .push_clients(recipient.id, &self.settings.allowed_user_api_push_urls)
            .await
        {
            Ok(clients) => clients,
            Err(e) => {
                warn!(user_id = recipient.id, error = %e, "Failed to look up push clients");
                return;
            }
        };

        if !clients.is_empty() {
            let job = ClientPushJob {
                clients,
                payload: payload.clone(),
                user_id: recipient.id,
            };
            self.enqueue(PushJob::ClientPush(job), queued).await;
        }
    }
}

#[async_trait]
impl NotificationDispatcher for PushDispatcher {
    async fn dispatch(
        &self,
        recipient: &PushRecipient,
        payload: &NotificationPayload,
    ) -> DispatchOutcome {
        if recipient.do_not_disturb {
            debug!(user_id = recipient.id, "Recipient in do-not-disturb, skipping push");
            return DispatchOutcome::Suppressed;
        }

        if let Some(filter) = self.filters.first_veto(recipient, payload) {
            debug!(user_id = recipient.id, filter, "Push vetoed by filter");
            return DispatchOutcome::Vetoed {
                filter: filter.to_string(),
            };
        }

        self.warn_missing_credentials();

        let mut queued = Vec::new();
        self.dispatch_browser_push(recipient, payload, &mut queued)
            .await;
        self.dispatch_onesignal(recipient, payload, &mut queued).await;
        self.dispatch_api_clients(recipient, payload, &mut queued)
            .await;

        DispatchOutcome::Dispatched { jobs: queued }
    }
}
