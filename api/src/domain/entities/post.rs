//! Post domain entity
//!
//! A shared prompt. Read-only snapshot for display purposes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::UserId;

/// Unique identifier for a post
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PostId(pub String);

impl From<&str> for PostId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl std::fmt::Display for PostId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A post as stored in the `posts` table
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Post {
    pub id: PostId,
    /// Empty when the row had no author
    pub author_id: UserId,
    pub created_at: Option<DateTime<Utc>>,
    pub text: String,
    pub category: Option<String>,
    pub sub_category: Option<String>,
    pub model_name: Option<String>,
    pub media_urls: Vec<String>,
}

/// How an attachment should be displayed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttachmentKind {
    Image,
    Video,
}

const VIDEO_EXTENSIONS: &[&str] = &["mp4", "webm", "ogg", "mov", "m4v", "avi", "mkv"];

impl AttachmentKind {
    /// Classify a media URL by its file extension.
    ///
    /// The query string and fragment are ignored and matching is
    /// case-insensitive. Anything that is not a known video extension,
    /// including a URL with no extension, is an image.
    pub fn from_url(url: &str) -> Self {
        let path = url
            .split(['?', '#'])
            .next()
            .unwrap_or_default();
        let file = path.rsplit('/').next().unwrap_or(path);

        match file.rsplit_once('.') {
            Some((_, ext)) if VIDEO_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()) => {
                AttachmentKind::Video
            }
            _ => AttachmentKind::Image,
        }
    }
}

impl std::fmt::Display for AttachmentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AttachmentKind::Image => write!(f, "image"),
            AttachmentKind::Video => write!(f, "video"),
        }
    }
}

/// A classified media attachment
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Attachment {
    pub url: String,
    pub kind: AttachmentKind,
}

impl Attachment {
    pub fn from_url(url: &str) -> Self {
        Self {
            url: url.to_string(),
            kind: AttachmentKind::from_url(url),
        }
    }
}
