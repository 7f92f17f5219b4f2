//! Backend adapter for ProfileRepository

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;

use super::client::{eq, in_list, BackendClient};
use super::rows::{decode_rows, ProfileRow};
use crate::domain::entities::{Profile, UserId};
use crate::domain::ports::ProfileRepository;
use crate::error::DomainError;

const TABLE: &str = "profiles";
const COLUMNS: &str = "id,username,full_name,avatar_url,bio";

pub struct BackendProfileRepository {
    client: Arc<BackendClient>,
}

impl BackendProfileRepository {
    pub fn new(client: Arc<BackendClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ProfileRepository for BackendProfileRepository {
    async fn find_by_id(&self, id: &UserId) -> Result<Option<Profile>, DomainError> {
        let params = vec![
            ("select".to_string(), COLUMNS.to_string()),
            eq("id", id.as_str()),
            ("limit".to_string(), "1".to_string()),
        ];

        let rows = self.client.select(TABLE, &params).await?;
        Ok(decode_rows::<ProfileRow>(TABLE, rows)
            .into_iter()
            .next()
            .map(Profile::from))
    }

    async fn find_by_ids(&self, ids: &[UserId]) -> Result<HashMap<UserId, Profile>, DomainError> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        let params = vec![
            ("select".to_string(), COLUMNS.to_string()),
            in_list("id", ids.iter().map(UserId::as_str)),
        ];

        let rows = self.client.select(TABLE, &params).await?;
        Ok(decode_rows::<ProfileRow>(TABLE, rows)
            .into_iter()
            .map(Profile::from)
            .filter(|p| !p.id.is_empty())
            .map(|p| (p.id.clone(), p))
            .collect())
    }
}
