//! Profile domain entity
//!
//! One profile per account. Ids are opaque strings handed out by the hosted
//! backend's auth service.

use serde::{Deserialize, Serialize};

/// Unique identifier for an account/profile
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub String);

impl UserId {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&str> for UserId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for UserId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A user's public profile
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Profile {
    pub id: UserId,
    pub username: Option<String>,
    pub full_name: Option<String>,
    pub avatar_url: Option<String>,
    pub bio: Option<String>,
}

impl Profile {
    /// Full name if set, otherwise username. Blank values count as unset.
    pub fn display_name(&self) -> Option<&str> {
        non_blank(self.full_name.as_deref()).or_else(|| non_blank(self.username.as_deref()))
    }
}

/// The signed-in account making the request
#[derive(Debug, Clone, PartialEq)]
pub struct Viewer {
    pub id: UserId,
    pub display_name: Option<String>,
}

/// Per-author aggregate counts shown next to posts and on profile pages
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorCounts {
    pub posts_count: i64,
    pub followers_count: i64,
    pub following_count: i64,
}

pub(crate) fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
