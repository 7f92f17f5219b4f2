//! Backend adapter for FollowRepository

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use async_trait::async_trait;

use super::client::{eq, BackendClient};
use super::rows::{decode_rows, FollowRow};
use crate::domain::entities::{FollowEdge, UserId};
use crate::domain::ports::FollowRepository;
use crate::error::DomainError;

const TABLE: &str = "follows";

pub struct BackendFollowRepository {
    client: Arc<BackendClient>,
}

impl BackendFollowRepository {
    pub fn new(client: Arc<BackendClient>) -> Self {
        Self { client }
    }

    /// Exact edge count per id, matching `column`
    async fn count_by(
        &self,
        column: &str,
        ids: &[UserId],
    ) -> Result<HashMap<UserId, i64>, DomainError> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        let totals = self
            .client
            .count_each(TABLE, column, ids.iter().map(UserId::as_str))
            .await?;

        Ok(ids.iter().cloned().zip(totals).collect())
    }
}

#[async_trait]
impl FollowRepository for BackendFollowRepository {
    async fn find_following_ids(
        &self,
        follower_id: &UserId,
    ) -> Result<HashSet<UserId>, DomainError> {
        if follower_id.is_empty() {
            return Ok(HashSet::new());
        }

        let params = vec![
            ("select".to_string(), "follower_id,following_id".to_string()),
            eq("follower_id", follower_id.as_str()),
        ];

        let rows = self.client.select(TABLE, &params).await?;
        Ok(decode_rows::<FollowRow>(TABLE, rows)
            .into_iter()
            .map(FollowEdge::from)
            .map(|edge| edge.following_id)
            .filter(|id| !id.is_empty())
            .collect())
    }

    async fn count_followers(&self, ids: &[UserId]) -> Result<HashMap<UserId, i64>, DomainError> {
        self.count_by("following_id", ids).await
    }

    async fn count_following(&self, ids: &[UserId]) -> Result<HashMap<UserId, i64>, DomainError> {
        self.count_by("follower_id", ids).await
    }
}
