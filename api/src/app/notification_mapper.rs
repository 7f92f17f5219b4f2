//! Notification mapping
//!
//! Turns a normalized notification row into what the client displays:
//! message text, relative time and a link target. Pure; the clock reading and
//! the formatter are passed in.

use chrono::{DateTime, Utc};
use serde::Serialize;
use urlencoding::encode;

use crate::domain::entities::profile::non_blank;
use crate::domain::entities::{NotificationRow, NotificationType, UserId};
use crate::domain::ports::{RelativeTimeFormatter, RelativeUnit};

/// Name used when nothing is known about the actor
pub const FALLBACK_ACTOR_NAME: &str = "Someone";

/// Text used when a notification carries no usable message
pub const GENERIC_MESSAGE: &str = "You have a new notification.";

const ABSOLUTE_TIME_FORMAT: &str = "%b %-d, %Y %H:%M";

/// Who triggered the notification
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationActor {
    pub id: UserId,
    pub name: String,
    pub username: Option<String>,
    pub avatar_url: Option<String>,
}

/// A notification ready for display
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppNotification {
    pub id: String,
    #[serde(rename = "type")]
    pub notification_type: NotificationType,
    pub message: String,
    /// Relative phrase such as "5 minutes ago", or an absolute date
    pub time_ago: String,
    pub created_at: Option<DateTime<Utc>>,
    pub read: bool,
    pub actor: Option<NotificationActor>,
    pub target_type: Option<String>,
    pub target_id: Option<String>,
    pub target_url: Option<String>,
}

/// Map one row. Identical inputs always give identical output.
pub fn map_notification(
    row: &NotificationRow,
    now: DateTime<Utc>,
    formatter: &dyn RelativeTimeFormatter,
) -> AppNotification {
    let payload = &row.payload;
    let actor_name = resolve_actor_name(row);

    let target_url = payload.target_url.clone().or_else(|| {
        derive_target_url(payload.target_type.as_deref(), payload.target_id.as_deref())
    });

    let mut message = compose_message(row, &actor_name);
    if let Some(snippet) = payload.snippet.as_deref() {
        message = format!("{} \"{}\"", message, snippet);
    }

    let actor = row.actor_id.as_ref().map(|id| NotificationActor {
        id: id.clone(),
        name: actor_name.clone(),
        username: row.actor.as_ref().and_then(|p| p.username.clone()),
        avatar_url: row.actor.as_ref().and_then(|p| p.avatar_url.clone()),
    });

    AppNotification {
        id: row.id.0.clone(),
        notification_type: row.notification_type.clone(),
        message,
        time_ago: row
            .created_at
            .map(|created_at| format_relative_time(created_at, now, formatter))
            .unwrap_or_default(),
        created_at: row.created_at,
        read: row.read,
        actor,
        target_type: payload.target_type.clone(),
        target_id: payload.target_id.clone(),
        target_url,
    }
}

/// Relative phrase for `created_at` as seen at `now`, falling back to an
/// absolute UTC date when the formatter has nothing to offer.
pub fn format_relative_time(
    created_at: DateTime<Utc>,
    now: DateTime<Utc>,
    formatter: &dyn RelativeTimeFormatter,
) -> String {
    let elapsed = (now - created_at).num_seconds();
    let (amount, unit) = relative_amount(elapsed);

    formatter
        .format(amount, unit)
        .unwrap_or_else(|| created_at.format(ABSOLUTE_TIME_FORMAT).to_string())
}

/// Pick the unit for `elapsed_secs` and the signed whole amount of it.
/// Past times (positive elapsed) give a negative amount.
pub fn relative_amount(elapsed_secs: i64) -> (i64, RelativeUnit) {
    let abs = elapsed_secs.saturating_abs();

    let unit = if abs < RelativeUnit::Minute.seconds() {
        RelativeUnit::Second
    } else if abs < RelativeUnit::Hour.seconds() {
        RelativeUnit::Minute
    } else if abs < RelativeUnit::Day.seconds() {
        RelativeUnit::Hour
    } else if abs < RelativeUnit::Week.seconds() {
        RelativeUnit::Day
    } else if abs < RelativeUnit::Month.seconds() {
        RelativeUnit::Week
    } else if abs < RelativeUnit::Year.seconds() {
        RelativeUnit::Month
    } else {
        RelativeUnit::Year
    };

    let amount = abs / unit.seconds();
    if elapsed_secs >= 0 {
        (-amount, unit)
    } else {
        (amount, unit)
    }
}

fn resolve_actor_name(row: &NotificationRow) -> String {
    row.actor
        .as_ref()
        .and_then(|p| p.display_name())
        .or_else(|| non_blank(row.payload.actor_email.as_deref()))
        .unwrap_or(FALLBACK_ACTOR_NAME)
        .to_string()
}

fn derive_target_url(target_type: Option<&str>, target_id: Option<&str>) -> Option<String> {
    match (target_type?, target_id?) {
        ("post", id) => Some(format!("/posts/{}", encode(id))),
        ("profile", id) => Some(format!("/profile/{}", encode(id))),
        _ => None,
    }
}

fn compose_message(row: &NotificationRow, actor: &str) -> String {
    let payload = &row.payload;
    let on_comment = payload.target_type.as_deref() == Some("comment");

    match &row.notification_type {
        NotificationType::Like => {
            let target = if on_comment { "comment" } else { "post" };
            format!("{} liked your {}.", actor, target)
        }
        NotificationType::Follow => format!("{} started following you.", actor),
        NotificationType::Mention => {
            let place = if on_comment { "in a comment" } else { "in a post" };
            format!("{} mentioned you {}.", actor, place)
        }
        NotificationType::System => payload
            .message
            .clone()
            .or_else(|| payload.title.clone())
            .unwrap_or_else(|| GENERIC_MESSAGE.to_string()),
        NotificationType::Other(_) => payload
            .message
            .clone()
            .unwrap_or_else(|| GENERIC_MESSAGE.to_string()),
    }
}
