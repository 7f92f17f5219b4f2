//! Follow relationship entity

use serde::Serialize;

use super::UserId;

/// A directed follow edge. Uniqueness per pair and the no-self-follow rule
/// are enforced by the backing table.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct FollowEdge {
    pub follower_id: UserId,
    pub following_id: UserId,
}

impl FollowEdge {
    pub fn new(follower_id: impl Into<UserId>, following_id: impl Into<UserId>) -> Self {
        Self {
            follower_id: follower_id.into(),
            following_id: following_id.into(),
        }
    }
}
