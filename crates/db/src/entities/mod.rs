//! Database entities.
//!
//! `onesignal_subscriptions` is owned by this service; the other tables
//! belong to the forum and are only read.

pub mod forum_user;
pub mod onesignal_subscription;
pub mod push_subscription;
pub mod user_api_key;
pub mod user_api_key_scope;

pub use forum_user::Entity as ForumUser;
pub use onesignal_subscription::Entity as OnesignalSubscription;
pub use push_subscription::Entity as PushSubscription;
pub use user_api_key::Entity as UserApiKey;
pub use user_api_key_scope::Entity as UserApiKeyScope;
