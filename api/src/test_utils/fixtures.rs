//! Test fixtures
//!
//! Factory functions for creating test data with sensible defaults.
//! Each fixture function creates a valid entity that can be customized.

use chrono::{DateTime, Duration, TimeZone, Utc};
use uuid::Uuid;

use crate::domain::entities::{
    NotificationId, NotificationPayload, NotificationRow, NotificationType, Post, PostId, Profile,
    UserId, Viewer,
};
use crate::domain::ports::{Clock, RelativeTimeFormatter, RelativeUnit};

/// The instant every fixture timestamp is measured from
pub fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
}

/// Create a viewer with no display name
pub fn test_viewer(id: &str) -> Viewer {
    Viewer {
        id: UserId::from(id),
        display_name: None,
    }
}

/// Create a post by `author`. All fixture posts share one timestamp, so
/// repositories return them in insertion order.
pub fn test_post(id: &str, author: &str) -> Post {
    Post {
        id: PostId::from(id),
        author_id: UserId::from(author),
        created_at: Some(fixed_now() - Duration::days(1)),
        text: format!("Prompt {}", id),
        category: Some("writing".to_string()),
        sub_category: Some("poetry".to_string()),
        model_name: Some("gpt-4o".to_string()),
        media_urls: vec![],
    }
}

/// Create a post with a random id
pub fn test_post_by(author: &str) -> Post {
    test_post(&Uuid::new_v4().to_string(), author)
}

/// Create a profile whose full name is the capitalized id
pub fn test_profile(id: &str) -> Profile {
    let mut chars = id.chars();
    let full_name = match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    };

    Profile {
        id: UserId::from(id),
        username: Some(id.to_string()),
        full_name: Some(full_name),
        avatar_url: Some(format!("https://cdn.test/avatars/{}.png", id)),
        bio: None,
    }
}

/// Create an unread notification an hour old, with the actor's profile
/// embedded when given
pub fn test_notification(
    id: &str,
    notification_type: NotificationType,
    actor: Option<Profile>,
) -> NotificationRow {
    NotificationRow {
        id: NotificationId::from(id),
        recipient_id: UserId::from("recipient"),
        actor_id: actor.as_ref().map(|a| a.id.clone()),
        notification_type,
        payload: NotificationPayload::default(),
        read: false,
        created_at: Some(fixed_now() - Duration::hours(1)),
        actor,
    }
}

/// Clock stuck at a given instant
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Default for FixedClock {
    fn default() -> Self {
        Self(fixed_now())
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Formatter that never has a phrase, forcing the absolute-date fallback
pub struct DecliningFormatter;

impl RelativeTimeFormatter for DecliningFormatter {
    fn format(&self, _amount: i64, _unit: RelativeUnit) -> Option<String> {
        None
    }
}
