//! Shared application state.

use std::sync::Arc;

use forumpush_core::{NotificationDispatcher, OnesignalSubscriptionService, RecipientDirectory};

/// Application state.
#[derive(Clone)]
pub struct AppState {
    pub dispatcher: Arc<dyn NotificationDispatcher>,
    pub directory: Arc<dyn RecipientDirectory>,
    pub onesignal_subscriptions: OnesignalSubscriptionService,
}
