//! Repositories.

mod forum_user;
mod onesignal_subscription;
mod push_subscription;
mod user_api_key;

pub use forum_user::ForumUserRepository;
pub use onesignal_subscription::OnesignalSubscriptionRepository;
pub use push_subscription::PushSubscriptionRepository;
pub use user_api_key::{PUSH_SCOPES, UserApiKeyRepository};
