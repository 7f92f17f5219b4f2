//! Feed service
//!
//! Fetches the rows a feed page needs and hands them to the assembler.
//! Independent reads are issued concurrently.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use serde::Serialize;

use super::feed_assembler::{
    apply_author_stats, assemble_feed, feed_author_ids, merge_author_counts, FeedPost,
};
use crate::domain::entities::{AuthorCounts, Profile, UserId, Viewer};
use crate::domain::ports::{FollowRepository, PostRepository, ProfileRepository};
use crate::error::{AppError, DomainError};

pub const DEFAULT_FEED_LIMIT: u32 = 20;
pub const MAX_FEED_LIMIT: u32 = 100;

/// One page of the home feed
#[derive(Debug, Clone, Serialize)]
pub struct Feed {
    pub posts: Vec<FeedPost>,
    pub limit: u32,
    pub offset: u32,
}

/// A profile page header: the profile plus its counts
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileSummary {
    pub id: UserId,
    pub username: Option<String>,
    pub full_name: Option<String>,
    pub avatar_url: Option<String>,
    pub bio: Option<String>,
    #[serde(flatten)]
    pub counts: AuthorCounts,
    /// Whether the viewer follows this profile
    pub is_following: bool,
}

/// Service for building feeds and profile headers
pub struct FeedService<PR, PfR, FR>
where
    PR: PostRepository,
    PfR: ProfileRepository,
    FR: FollowRepository,
{
    posts: Arc<PR>,
    profiles: Arc<PfR>,
    follows: Arc<FR>,
    default_limit: u32,
}

impl<PR, PfR, FR> FeedService<PR, PfR, FR>
where
    PR: PostRepository,
    PfR: ProfileRepository,
    FR: FollowRepository,
{
    pub fn new(posts: Arc<PR>, profiles: Arc<PfR>, follows: Arc<FR>) -> Self {
        Self {
            posts,
            profiles,
            follows,
            default_limit: DEFAULT_FEED_LIMIT,
        }
    }

    /// Override the page size used when the caller gives none
    pub fn with_default_limit(mut self, limit: u32) -> Self {
        self.default_limit = limit.clamp(1, MAX_FEED_LIMIT);
        self
    }

    /// Generate a feed page for the viewer
    pub async fn generate_feed(
        &self,
        viewer: &Viewer,
        limit: Option<u32>,
        offset: u32,
    ) -> Result<Feed, AppError> {
        let limit = limit
            .unwrap_or(self.default_limit)
            .clamp(1, MAX_FEED_LIMIT);

        let (posts, followed_ids) = tokio::try_join!(
            self.posts.find_recent(limit, offset),
            self.follows.find_following_ids(&viewer.id),
        )?;

        let mut seen = HashSet::new();
        let author_ids: Vec<UserId> = posts
            .iter()
            .map(|p| &p.author_id)
            .filter(|id| !id.is_empty() && seen.insert(*id))
            .cloned()
            .collect();

        let profiles: HashMap<UserId, Profile> = if author_ids.is_empty() {
            HashMap::new()
        } else {
            self.profiles.find_by_ids(&author_ids).await?
        };

        let mut items = assemble_feed(&posts, &profiles, &followed_ids, viewer);

        let page_authors = feed_author_ids(&items);
        let stats = self.author_counts(&page_authors).await;
        apply_author_stats(&mut items, &stats);

        tracing::debug!(
            viewer = %viewer.id,
            posts = items.len(),
            followed = followed_ids.len(),
            "Assembled feed page"
        );

        Ok(Feed {
            posts: items,
            limit,
            offset,
        })
    }

    /// Profile header with post, follower and following counts
    pub async fn profile_summary(
        &self,
        viewer: &Viewer,
        id: &UserId,
    ) -> Result<ProfileSummary, AppError> {
        let (profile, followed_ids) = tokio::try_join!(
            self.profiles.find_by_id(id),
            self.follows.find_following_ids(&viewer.id),
        )?;
        let profile =
            profile.ok_or_else(|| DomainError::NotFound(format!("Profile {}", id)))?;

        let ids = [profile.id.clone()];
        let counts = self
            .author_counts(&ids)
            .await
            .remove(&profile.id)
            .unwrap_or_default();

        Ok(ProfileSummary {
            is_following: followed_ids.contains(&profile.id),
            id: profile.id,
            username: profile.username,
            full_name: profile.full_name,
            avatar_url: profile.avatar_url,
            bio: profile.bio,
            counts,
        })
    }

    /// Counts for the given authors. Counts are decorative, so a failed
    /// lookup is logged and yields zeros instead of failing the page.
    async fn author_counts(&self, author_ids: &[UserId]) -> HashMap<UserId, AuthorCounts> {
        if author_ids.is_empty() {
            return HashMap::new();
        }

        match tokio::try_join!(
            self.posts.count_by_authors(author_ids),
            self.follows.count_followers(author_ids),
            self.follows.count_following(author_ids),
        ) {
            Ok((posts, followers, following)) => {
                merge_author_counts(author_ids, &posts, &followers, &following)
            }
            Err(e) => {
                tracing::warn!(error = %e, authors = author_ids.len(), "Failed to load author counts");
                HashMap::new()
            }
        }
    }
}
