//! Notification payloads handed over by the forum's notification pipeline.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Heading used when nothing more specific is available.
pub const DEFAULT_HEADING: &str = "Notification";

/// Forum notification types, identified by their integer code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "i32", into = "i32")]
pub enum NotificationType {
    /// Mentioned in a post
    Mentioned,
    /// Reply to the user's post
    Replied,
    /// Quoted in a post
    Quoted,
    /// The user's post was edited
    Edited,
    /// The user's post was liked
    Liked,
    /// New private message
    PrivateMessage,
    /// Invited to a private message
    InvitedToPrivateMessage,
    /// An invitee accepted the invitation
    InviteeAccepted,
    /// New post in a watched topic
    Posted,
    /// The user's post was moved
    MovedPost,
    /// The user's post was linked
    Linked,
    /// A badge was granted
    GrantedBadge,
    /// Invited to a topic
    InvitedToTopic,
    /// Plugin-defined notification
    Custom,
    /// A group the user belongs to was mentioned
    GroupMentioned,
    /// Group inbox summary
    GroupMessageSummary,
    /// First post in a watched category
    WatchingFirstPost,
    /// Topic reminder
    TopicReminder,
    /// Consolidated likes
    LikedConsolidated,
    /// The user's post was approved
    PostApproved,
    /// Mentioned in chat
    ChatMention,
    /// New chat message
    ChatMessage,
    /// Any code without a dedicated variant
    Other(i32),
}

impl NotificationType {
    /// Integer code as used by the forum.
    #[must_use]
    pub const fn code(self) -> i32 {
        match self {
            Self::Mentioned => 1,
            Self::Replied => 2,
            Self::Quoted => 3,
            Self::Edited => 4,
            Self::Liked => 5,
            Self::PrivateMessage => 6,
            Self::InvitedToPrivateMessage => 7,
            Self::InviteeAccepted => 8,
            Self::Posted => 9,
            Self::MovedPost => 10,
            Self::Linked => 11,
            Self::GrantedBadge => 12,
            Self::InvitedToTopic => 13,
            Self::Custom => 14,
            Self::GroupMentioned => 15,
            Self::GroupMessageSummary => 16,
            Self::WatchingFirstPost => 17,
            Self::TopicReminder => 18,
            Self::LikedConsolidated => 19,
            Self::PostApproved => 20,
            Self::ChatMention => 29,
            Self::ChatMessage => 30,
            Self::Other(code) => code,
        }
    }

    /// Key used for localized titles, if the type has one.
    #[must_use]
    pub const fn title_key(self) -> Option<&'static str> {
        match self {
            Self::ChatMention => Some("chat_mention"),
            Self::ChatMessage => Some("chat_message"),
            _ => None,
        }
    }
}

impl From<i32> for NotificationType {
    fn from(code: i32) -> Self {
        match code {
            1 => Self::Mentioned,
            2 => Self::Replied,
            3 => Self::Quoted,
            4 => Self::Edited,
            5 => Self::Liked,
            6 => Self::PrivateMessage,
            7 => Self::InvitedToPrivateMessage,
            8 => Self::InviteeAccepted,
            9 => Self::Posted,
            10 => Self::MovedPost,
            11 => Self::Linked,
            12 => Self::GrantedBadge,
            13 => Self::InvitedToTopic,
            14 => Self::Custom,
            15 => Self::GroupMentioned,
            16 => Self::GroupMessageSummary,
            17 => Self::WatchingFirstPost,
            18 => Self::TopicReminder,
            19 => Self::LikedConsolidated,
            20 => Self::PostApproved,
            29 => Self::ChatMention,
            30 => Self::ChatMessage,
            other => Self::Other(other),
        }
    }
}

impl From<NotificationType> for i32 {
    fn from(value: NotificationType) -> Self {
        value.code()
    }
}

impl fmt::Display for NotificationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Push payload built by the forum for a single notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationPayload {
    /// Notification type
    pub notification_type: NotificationType,
    /// Acting user's username
    #[serde(default)]
    pub username: String,
    /// Post excerpt
    #[serde(default)]
    pub excerpt: String,
    /// Topic title, may be blank
    #[serde(default)]
    pub topic_title: String,
    /// Relative URL of the post
    #[serde(default)]
    pub post_url: String,
    /// Topic ID
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub topic_id: Option<i64>,
    /// Post number within the topic
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub post_number: Option<i32>,
}

/// Localized notification titles.
#[derive(Debug, Clone)]
pub struct TitleCatalog {
    titles: HashMap<String, String>,
}

impl TitleCatalog {
    /// English defaults, overridden by any non-blank entry in `overrides`.
    #[must_use]
    pub fn with_overrides(overrides: &HashMap<String, String>) -> Self {
        let mut titles = HashMap::from([
            ("chat_mention".to_string(), "Chat mention".to_string()),
            ("chat_message".to_string(), "New chat message".to_string()),
        ]);
        for (key, title) in overrides {
            if !title.trim().is_empty() {
                titles.insert(key.clone(), title.clone());
            }
        }
        Self { titles }
    }

    /// Localized title for a notification type.
    #[must_use]
    pub fn title_for(&self, notification_type: NotificationType) -> Option<&str> {
        notification_type
            .title_key()
            .and_then(|key| self.titles.get(key))
            .map(String::as_str)
    }

    /// Heading for a payload.
    ///
    /// Types with a localized title use it; everything else falls back to
    /// the topic title, then to [`DEFAULT_HEADING`].
    #[must_use]
    pub fn heading(&self, payload: &NotificationPayload) -> String {
        if let Some(title) = self.title_for(payload.notification_type) {
            return title.to_string();
        }
        if payload.topic_title.trim().is_empty() {
            DEFAULT_HEADING.to_string()
        } else {
            payload.topic_title.clone()
        }
    }
}

impl Default for TitleCatalog {
    fn default() -> Self {
        Self::with_overrides(&HashMap::new())
    }
}
