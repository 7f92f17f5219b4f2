//! Backend adapter for PostRepository

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;

use super::client::{BackendClient, Filter};
use super::rows::{decode_rows, PostRow};
use crate::domain::entities::{Post, UserId};
use crate::domain::ports::PostRepository;
use crate::error::DomainError;

const TABLE: &str = "posts";

pub struct BackendPostRepository {
    client: Arc<BackendClient>,
}

impl BackendPostRepository {
    pub fn new(client: Arc<BackendClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl PostRepository for BackendPostRepository {
    async fn find_recent(&self, limit: u32, offset: u32) -> Result<Vec<Post>, DomainError> {
        let params: Vec<Filter> = vec![
            ("select".to_string(), "*".to_string()),
            ("order".to_string(), "created_at.desc".to_string()),
            ("limit".to_string(), limit.to_string()),
            ("offset".to_string(), offset.to_string()),
        ];

        let rows = self.client.select(TABLE, &params).await?;
        let posts = decode_rows::<PostRow>(TABLE, rows)
            .into_iter()
            .map(Post::from)
            .collect();

        Ok(posts)
    }

    async fn count_by_authors(
        &self,
        author_ids: &[UserId],
    ) -> Result<HashMap<UserId, i64>, DomainError> {
        if author_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let totals = self
            .client
            .count_each(TABLE, "author_id", author_ids.iter().map(UserId::as_str))
            .await?;

        Ok(author_ids.iter().cloned().zip(totals).collect())
    }
}
