//! Feed assembly
//!
//! Pure transformation from already-fetched rows into the post feed a viewer
//! sees. No I/O happens here; `FeedService` does the fetching.

use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::entities::profile::non_blank;
use crate::domain::entities::{Attachment, AuthorCounts, Post, Profile, UserId, Viewer};

/// Name shown when an author has no usable profile data
pub const FALLBACK_USER_NAME: &str = "User";

/// Denormalized author block attached to every feed post
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedUser {
    /// Author id, empty when the post had none
    pub id: UserId,
    pub name: String,
    pub username: Option<String>,
    pub avatar_url: Option<String>,
    pub bio: Option<String>,
    pub posts_count: i64,
    pub followers_count: i64,
    pub following_count: i64,
}

/// Engagement numbers. Always zero for now; likes, comments and saves are
/// loaded by the post detail view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct FeedStats {
    pub likes: i64,
    pub comments: i64,
    pub saves: i64,
}

/// A post enriched for display
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedPost {
    pub id: String,
    pub created_at: Option<DateTime<Utc>>,
    pub text: String,
    pub category: Option<String>,
    pub sub_category: Option<String>,
    pub model_name: Option<String>,
    pub attachments: Vec<Attachment>,
    pub user: FeedUser,
    pub stats: FeedStats,
}

/// Build the feed for `viewer`.
///
/// Posts by followed authors come first, everything else after; each group
/// keeps the input order. Author counts are left at zero, see
/// [`apply_author_stats`].
pub fn assemble_feed(
    posts: &[Post],
    profiles: &HashMap<UserId, Profile>,
    followed_ids: &HashSet<UserId>,
    viewer: &Viewer,
) -> Vec<FeedPost> {
    let items = posts
        .iter()
        .map(|post| to_feed_post(post, profiles.get(&post.author_id), viewer));

    let (mut followed, other): (Vec<FeedPost>, Vec<FeedPost>) = items.partition(|item| {
        !item.user.id.is_empty() && followed_ids.contains(&item.user.id)
    });

    followed.extend(other);
    followed
}

/// Distinct author ids in feed order, skipping posts without an author
pub fn feed_author_ids(feed: &[FeedPost]) -> Vec<UserId> {
    let mut seen = HashSet::new();
    feed.iter()
        .map(|item| &item.user.id)
        .filter(|id| !id.is_empty() && seen.insert(*id))
        .cloned()
        .collect()
}

/// Second pass: copy per-author counts onto every post. Authors missing from
/// `stats` get zeros.
pub fn apply_author_stats(feed: &mut [FeedPost], stats: &HashMap<UserId, AuthorCounts>) {
    for item in feed.iter_mut() {
        let counts = stats.get(&item.user.id).copied().unwrap_or_default();
        item.user.posts_count = counts.posts_count;
        item.user.followers_count = counts.followers_count;
        item.user.following_count = counts.following_count;
    }
}

/// Merge the three count maps returned by the repositories
pub fn merge_author_counts(
    author_ids: &[UserId],
    posts: &HashMap<UserId, i64>,
    followers: &HashMap<UserId, i64>,
    following: &HashMap<UserId, i64>,
) -> HashMap<UserId, AuthorCounts> {
    author_ids
        .iter()
        .map(|id| {
            let counts = AuthorCounts {
                posts_count: posts.get(id).copied().unwrap_or(0),
                followers_count: followers.get(id).copied().unwrap_or(0),
                following_count: following.get(id).copied().unwrap_or(0),
            };
            (id.clone(), counts)
        })
        .collect()
}

/// Name precedence: full name, username, the viewer's own name when the
/// viewer wrote the post, then the fallback.
fn resolve_display_name(author_id: &UserId, profile: Option<&Profile>, viewer: &Viewer) -> String {
    if let Some(name) = profile.and_then(Profile::display_name) {
        return name.to_string();
    }

    if !author_id.is_empty() && *author_id == viewer.id {
        if let Some(name) = non_blank(viewer.display_name.as_deref()) {
            return name.to_string();
        }
    }

    FALLBACK_USER_NAME.to_string()
}

fn to_feed_post(post: &Post, profile: Option<&Profile>, viewer: &Viewer) -> FeedPost {
    let attachments = post
        .media_urls
        .iter()
        .map(|url| url.trim())
        .filter(|url| !url.is_empty())
        .map(Attachment::from_url)
        .collect();

    FeedPost {
        id: post.id.0.clone(),
        created_at: post.created_at,
        text: post.text.clone(),
        category: post.category.clone(),
        sub_category: post.sub_category.clone(),
        model_name: post.model_name.clone(),
        attachments,
        user: FeedUser {
            id: post.author_id.clone(),
            name: resolve_display_name(&post.author_id, profile, viewer),
            username: profile.and_then(|p| p.username.clone()),
            avatar_url: profile.and_then(|p| p.avatar_url.clone()),
            bio: profile.and_then(|p| p.bio.clone()),
            ..Default::default()
        },
        stats: FeedStats::default(),
    }
}
