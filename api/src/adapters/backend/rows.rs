//! Raw table rows and their normalization into domain entities
//!
//! Every field is optional on the wire. Rows are decoded one at a time so a
//! single malformed record is skipped without losing the rest of the page.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::de::{DeserializeOwned, Deserializer};
use serde::Deserialize;
use serde_json::Value;

use crate::domain::entities::{
    FollowEdge, NotificationId, NotificationPayload, NotificationRow, NotificationType, Post,
    PostId, Profile, UserId,
};

/// Decode rows, logging and dropping any that fail
pub fn decode_rows<T: DeserializeOwned>(table: &str, rows: Vec<Value>) -> Vec<T> {
    rows.into_iter()
        .enumerate()
        .filter_map(|(index, row)| match serde_json::from_value(row) {
            Ok(decoded) => Some(decoded),
            Err(e) => {
                tracing::warn!(table, index, error = %e, "Skipping malformed row");
                None
            }
        })
        .collect()
}

/// Ids may arrive as strings or numbers; anything else becomes empty
fn opaque_id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => s,
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    })
}

fn optional_id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    let id = opaque_id(deserializer)?;
    Ok(Some(id).filter(|id| !id.is_empty()))
}

/// Strings only; other JSON types are treated as absent
fn lenient_string<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<String>, D::Error> {
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => Some(s),
        _ => None,
    })
}

/// Accepts RFC 3339 as well as Postgres' `2024-01-01 00:00:00+00` style
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }
    if let Ok(ts) = DateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f%#z") {
        return Some(ts.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| naive.and_utc())
}

fn timestamp<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<DateTime<Utc>>, D::Error> {
    Ok(lenient_string(deserializer)?.as_deref().and_then(parse_timestamp))
}

/// `media_urls` is a JSON array; non-string entries are dropped and a single
/// string is treated as a one-element list
fn media_urls<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Array(items)) => items
            .into_iter()
            .filter_map(|item| match item {
                Value::String(s) => Some(s),
                _ => None,
            })
            .collect(),
        Some(Value::String(s)) if !s.trim().is_empty() => vec![s],
        _ => Vec::new(),
    })
}

fn lenient_bool<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(matches!(value, Some(Value::Bool(true))))
}

/// Row from the `posts` table
#[derive(Debug, Deserialize)]
pub struct PostRow {
    #[serde(default, deserialize_with = "opaque_id")]
    pub id: String,
    #[serde(default, alias = "user_id", deserialize_with = "opaque_id")]
    pub author_id: String,
    #[serde(default, deserialize_with = "timestamp")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, alias = "content", deserialize_with = "lenient_string")]
    pub text: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub category: Option<String>,
    #[serde(default, alias = "subcategory", deserialize_with = "lenient_string")]
    pub sub_category: Option<String>,
    #[serde(default, alias = "model", deserialize_with = "lenient_string")]
    pub model_name: Option<String>,
    #[serde(default, deserialize_with = "media_urls")]
    pub media_urls: Vec<String>,
}

impl From<PostRow> for Post {
    fn from(row: PostRow) -> Self {
        Post {
            id: PostId(row.id),
            author_id: UserId(row.author_id),
            created_at: row.created_at,
            text: row.text.unwrap_or_default(),
            category: row.category,
            sub_category: row.sub_category,
            model_name: row.model_name,
            media_urls: row.media_urls,
        }
    }
}

/// Row from the `profiles` table
#[derive(Debug, Deserialize)]
pub struct ProfileRow {
    #[serde(default, deserialize_with = "opaque_id")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub username: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub full_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub avatar_url: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub bio: Option<String>,
}

impl From<ProfileRow> for Profile {
    fn from(row: ProfileRow) -> Self {
        Profile {
            id: UserId(row.id),
            username: row.username,
            full_name: row.full_name,
            avatar_url: row.avatar_url,
            bio: row.bio,
        }
    }
}

/// Row from the `follows` table
#[derive(Debug, Deserialize)]
pub struct FollowRow {
    #[serde(default, deserialize_with = "opaque_id")]
    pub follower_id: String,
    #[serde(default, deserialize_with = "opaque_id")]
    pub following_id: String,
}

impl From<FollowRow> for FollowEdge {
    fn from(row: FollowRow) -> Self {
        FollowEdge::new(row.follower_id, row.following_id)
    }
}

/// Row from the `notifications` table with the actor profile embedded
#[derive(Debug, Deserialize)]
pub struct NotificationRecord {
    #[serde(default, deserialize_with = "opaque_id")]
    pub id: String,
    #[serde(default, alias = "user_id", deserialize_with = "opaque_id")]
    pub recipient_id: String,
    #[serde(default, deserialize_with = "optional_id")]
    pub actor_id: Option<String>,
    #[serde(default, rename = "type", deserialize_with = "lenient_string")]
    pub notification_type: Option<String>,
    #[serde(default, alias = "data")]
    pub payload: Value,
    #[serde(default, alias = "is_read", deserialize_with = "lenient_bool")]
    pub read: bool,
    #[serde(default, deserialize_with = "timestamp")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub actor: Value,
}

impl From<NotificationRecord> for NotificationRow {
    fn from(record: NotificationRecord) -> Self {
        // A missing actor embed comes back as null; a broken one is ignored
        let actor = match record.actor {
            Value::Object(_) => serde_json::from_value::<ProfileRow>(record.actor)
                .ok()
                .map(Profile::from),
            _ => None,
        };

        NotificationRow {
            id: NotificationId(record.id),
            recipient_id: UserId(record.recipient_id),
            actor_id: record.actor_id.map(UserId),
            notification_type: NotificationType::from(
                record.notification_type.as_deref().unwrap_or_default(),
            ),
            payload: NotificationPayload::from_json(&record.payload),
            read: record.read,
            created_at: record.created_at,
            actor,
        }
    }
}
