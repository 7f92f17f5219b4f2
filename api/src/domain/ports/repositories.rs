//! Repository port traits
//!
//! These traits define the interface for reading the hosted backend's tables.
//! Implementations are provided by adapters (e.g., the REST backend client).

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;

use crate::domain::entities::{NotificationId, NotificationRow, Post, Profile, UserId};
use crate::error::DomainError;

/// Repository for Post entities
#[async_trait]
pub trait PostRepository: Send + Sync {
    /// Most recent posts first
    async fn find_recent(&self, limit: u32, offset: u32) -> Result<Vec<Post>, DomainError>;

    /// Total number of posts per author, across all posts.
    /// Authors without posts may be absent from the map.
    async fn count_by_authors(
        &self,
        author_ids: &[UserId],
    ) -> Result<HashMap<UserId, i64>, DomainError>;
}

/// Repository for Profile entities
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    /// Find a profile by account ID
    async fn find_by_id(&self, id: &UserId) -> Result<Option<Profile>, DomainError>;

    /// Find profiles for a set of ids, keyed by id. Unknown ids are absent.
    async fn find_by_ids(&self, ids: &[UserId]) -> Result<HashMap<UserId, Profile>, DomainError>;
}

/// Repository for follow edges
#[async_trait]
pub trait FollowRepository: Send + Sync {
    /// Ids of every account `follower_id` follows
    async fn find_following_ids(&self, follower_id: &UserId)
        -> Result<HashSet<UserId>, DomainError>;

    /// Number of followers per account
    async fn count_followers(&self, ids: &[UserId]) -> Result<HashMap<UserId, i64>, DomainError>;

    /// Number of accounts each account follows
    async fn count_following(&self, ids: &[UserId]) -> Result<HashMap<UserId, i64>, DomainError>;
}

/// Repository for notification rows
#[async_trait]
pub trait NotificationRepository: Send + Sync {
    /// Notifications for a recipient, newest first, joined with actor profiles
    async fn find_for_recipient(
        &self,
        recipient_id: &UserId,
        limit: u32,
    ) -> Result<Vec<NotificationRow>, DomainError>;

    /// Number of unread notifications for a recipient
    async fn count_unread(&self, recipient_id: &UserId) -> Result<i64, DomainError>;

    /// Mark one notification read. Returns false if no row belonging to the
    /// recipient matched.
    async fn mark_read(
        &self,
        recipient_id: &UserId,
        id: &NotificationId,
    ) -> Result<bool, DomainError>;

    /// Mark all of a recipient's notifications read, returning how many changed
    async fn mark_all_read(&self, recipient_id: &UserId) -> Result<u64, DomainError>;
}
