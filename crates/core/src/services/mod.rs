//! Business logic services.

#![allow(missing_docs)]

pub mod jobs;
pub mod onesignal;
pub mod onesignal_subscription;
pub mod payload;
pub mod push_dispatch;
pub mod push_filter;
pub mod recipient;

pub use jobs::{ClientPushJob, JobQueue, OnesignalPushJob, PushJob, SendPushNotificationJob};
pub use onesignal::{DeliveryOutcome, OnesignalClient, OnesignalNotification};
pub use onesignal_subscription::{
    OnesignalSubscriptionService, SubscriptionInput, SubscriptionResponse,
};
pub use payload::{DEFAULT_HEADING, NotificationPayload, NotificationType, TitleCatalog};
pub use push_dispatch::{DispatchOutcome, NotificationDispatcher, PushDispatcher};
pub use push_filter::{FilterChain, FnFilter, PushFilter, SuppressedTypesFilter};
pub use recipient::{DbRecipientDirectory, PushClient, PushRecipient, RecipientDirectory};
