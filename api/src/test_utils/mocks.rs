//! Mock implementations of port traits
//!
//! These are in-memory implementations that can be configured for testing.
//! They store data in memory and allow tests to verify behavior.

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, RwLock};

use crate::domain::entities::{
    FollowEdge, NotificationId, NotificationRow, Post, Profile, UserId, Viewer,
};
use crate::domain::ports::{
    FollowRepository, NotificationRepository, PostRepository, ProfileRepository, SessionVerifier,
};
use crate::error::DomainError;

// ============================================================================
// In-Memory Post Repository
// ============================================================================

#[derive(Default)]
pub struct InMemoryPostRepository {
    posts: Arc<RwLock<Vec<Post>>>,
    fail_counts: bool,
}

impl InMemoryPostRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate with a post for testing
    pub fn with_post(self, post: Post) -> Self {
        self.posts.write().unwrap().push(post);
        self
    }

    /// Make `count_by_authors` fail
    pub fn failing_counts(mut self) -> Self {
        self.fail_counts = true;
        self
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn find_recent(&self, limit: u32, offset: u32) -> Result<Vec<Post>, DomainError> {
        let mut posts = self.posts.read().unwrap().clone();
        // Stable, so equal timestamps keep insertion order
        posts.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        Ok(posts
            .into_iter()
            .skip(offset as usize)
            .take(limit as usize)
            .collect())
    }

    async fn count_by_authors(
        &self,
        author_ids: &[UserId],
    ) -> Result<HashMap<UserId, i64>, DomainError> {
        if self.fail_counts {
            return Err(DomainError::Database("count failed".to_string()));
        }

        let wanted: HashSet<&UserId> = author_ids.iter().collect();
        let mut counts = HashMap::new();
        for post in self.posts.read().unwrap().iter() {
            if wanted.contains(&post.author_id) {
                *counts.entry(post.author_id.clone()).or_insert(0) += 1;
            }
        }
        Ok(counts)
    }
}

// ============================================================================
// In-Memory Profile Repository
// ============================================================================

#[derive(Default)]
pub struct InMemoryProfileRepository {
    profiles: Arc<RwLock<HashMap<UserId, Profile>>>,
}

impl InMemoryProfileRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate with a profile for testing
    pub fn with_profile(self, profile: Profile) -> Self {
        self.profiles
            .write()
            .unwrap()
            .insert(profile.id.clone(), profile);
        self
    }
}

#[async_trait]
impl ProfileRepository for InMemoryProfileRepository {
    async fn find_by_id(&self, id: &UserId) -> Result<Option<Profile>, DomainError> {
        Ok(self.profiles.read().unwrap().get(id).cloned())
    }

    async fn find_by_ids(&self, ids: &[UserId]) -> Result<HashMap<UserId, Profile>, DomainError> {
        let profiles = self.profiles.read().unwrap();
        Ok(ids
            .iter()
            .filter_map(|id| profiles.get(id).map(|p| (id.clone(), p.clone())))
            .collect())
    }
}

// ============================================================================
// In-Memory Follow Repository
// ============================================================================

#[derive(Default)]
pub struct InMemoryFollowRepository {
    edges: Arc<RwLock<HashSet<FollowEdge>>>,
}

impl InMemoryFollowRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a `follower -> following` edge
    pub fn with_edge(self, follower: &str, following: &str) -> Self {
        self.edges
            .write()
            .unwrap()
            .insert(FollowEdge::new(follower, following));
        self
    }

    fn count_by(
        &self,
        ids: &[UserId],
        key: impl Fn(&FollowEdge) -> &UserId,
    ) -> HashMap<UserId, i64> {
        let wanted: HashSet<&UserId> = ids.iter().collect();
        let mut counts = HashMap::new();
        for edge in self.edges.read().unwrap().iter() {
            let id = key(edge);
            if wanted.contains(id) {
                *counts.entry(id.clone()).or_insert(0) += 1;
            }
        }
        counts
    }
}

#[async_trait]
impl FollowRepository for InMemoryFollowRepository {
    async fn find_following_ids(
        &self,
        follower_id: &UserId,
    ) -> Result<HashSet<UserId>, DomainError> {
        Ok(self
            .edges
            .read()
            .unwrap()
            .iter()
            .filter(|e| e.follower_id == *follower_id)
            .map(|e| e.following_id.clone())
            .collect())
    }

    async fn count_followers(&self, ids: &[UserId]) -> Result<HashMap<UserId, i64>, DomainError> {
        Ok(self.count_by(ids, |e| &e.following_id))
    }

    async fn count_following(&self, ids: &[UserId]) -> Result<HashMap<UserId, i64>, DomainError> {
        Ok(self.count_by(ids, |e| &e.follower_id))
    }
}

// ============================================================================
// In-Memory Notification Repository
// ============================================================================

#[derive(Default)]
pub struct InMemoryNotificationRepository {
    rows: Arc<RwLock<Vec<NotificationRow>>>,
}

impl InMemoryNotificationRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate with a notification for testing
    pub fn with_row(self, row: NotificationRow) -> Self {
        self.rows.write().unwrap().push(row);
        self
    }
}

#[async_trait]
impl NotificationRepository for InMemoryNotificationRepository {
    async fn find_for_recipient(
        &self,
        recipient_id: &UserId,
        limit: u32,
    ) -> Result<Vec<NotificationRow>, DomainError> {
        let mut rows: Vec<NotificationRow> = self
            .rows
            .read()
            .unwrap()
            .iter()
            .filter(|r| r.recipient_id == *recipient_id)
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        rows.truncate(limit as usize);
        Ok(rows)
    }

    async fn count_unread(&self, recipient_id: &UserId) -> Result<i64, DomainError> {
        Ok(self
            .rows
            .read()
            .unwrap()
            .iter()
            .filter(|r| r.recipient_id == *recipient_id && !r.read)
            .count() as i64)
    }

    async fn mark_read(
        &self,
        recipient_id: &UserId,
        id: &NotificationId,
    ) -> Result<bool, DomainError> {
        let mut rows = self.rows.write().unwrap();
        match rows
            .iter_mut()
            .find(|r| r.id == *id && r.recipient_id == *recipient_id)
        {
            Some(row) => {
                row.read = true;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn mark_all_read(&self, recipient_id: &UserId) -> Result<u64, DomainError> {
        let mut rows = self.rows.write().unwrap();
        let mut updated = 0;
        for row in rows
            .iter_mut()
            .filter(|r| r.recipient_id == *recipient_id && !r.read)
        {
            row.read = true;
            updated += 1;
        }
        Ok(updated)
    }
}

// ============================================================================
// Static Session Verifier
// ============================================================================

/// Accepts a fixed set of tokens
#[derive(Default)]
pub struct StaticSessionVerifier {
    sessions: HashMap<String, Viewer>,
}

impl StaticSessionVerifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_session(mut self, token: &str, viewer: Viewer) -> Self {
        self.sessions.insert(token.to_string(), viewer);
        self
    }
}

#[async_trait]
impl SessionVerifier for StaticSessionVerifier {
    async fn verify(&self, access_token: &str) -> Result<Option<Viewer>, DomainError> {
        Ok(self.sessions.get(access_token).cloned())
    }
}
