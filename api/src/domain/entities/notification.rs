//! Notification domain entity
//!
//! Rows from the `notifications` table, normalized into a fixed shape. The
//! free-form JSON payload is read once into [`NotificationPayload`]; nothing
//! downstream looks at raw JSON keys.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{Profile, UserId};

/// Unique identifier for a notification
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NotificationId(pub String);

impl From<&str> for NotificationId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl std::fmt::Display for NotificationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Kind of notification. Unknown kinds are kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotificationType {
    Like,
    Follow,
    Mention,
    System,
    Other(String),
}

impl NotificationType {
    pub fn as_str(&self) -> &str {
        match self {
            NotificationType::Like => "like",
            NotificationType::Follow => "follow",
            NotificationType::Mention => "mention",
            NotificationType::System => "system",
            NotificationType::Other(s) => s,
        }
    }
}

impl From<&str> for NotificationType {
    fn from(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "like" => NotificationType::Like,
            "follow" => NotificationType::Follow,
            "mention" => NotificationType::Mention,
            "system" => NotificationType::System,
            _ => NotificationType::Other(s.to_string()),
        }
    }
}

impl std::fmt::Display for NotificationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Serialize for NotificationType {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Known fields of a notification payload
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NotificationPayload {
    pub target_type: Option<String>,
    pub target_id: Option<String>,
    pub target_url: Option<String>,
    pub snippet: Option<String>,
    pub message: Option<String>,
    pub title: Option<String>,
    pub actor_email: Option<String>,
}

impl NotificationPayload {
    /// Read the known keys out of a raw payload, accepting both camelCase and
    /// snake_case spellings. Anything that is not an object yields an empty
    /// payload; fields with the wrong type are ignored.
    pub fn from_json(value: &Value) -> Self {
        let Some(map) = value.as_object() else {
            return Self::default();
        };

        let field = |keys: &[&str]| -> Option<String> {
            keys.iter().find_map(|key| match map.get(*key)? {
                Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
                Value::Number(n) => Some(n.to_string()),
                _ => None,
            })
        };

        Self {
            target_type: field(&["targetType", "target_type"]).map(|t| t.to_lowercase()),
            target_id: field(&["targetId", "target_id"]),
            target_url: field(&["targetUrl", "target_url"]),
            snippet: field(&["snippet", "preview"]),
            message: field(&["message"]),
            title: field(&["title"]),
            actor_email: field(&["actorEmail", "actor_email"]),
        }
    }
}

/// A notification row joined with its actor's profile
#[derive(Debug, Clone, PartialEq)]
pub struct NotificationRow {
    pub id: NotificationId,
    pub recipient_id: UserId,
    pub actor_id: Option<UserId>,
    pub notification_type: NotificationType,
    pub payload: NotificationPayload,
    pub read: bool,
    pub created_at: Option<DateTime<Utc>>,
    /// Actor's profile, when the actor still exists
    pub actor: Option<Profile>,
}
