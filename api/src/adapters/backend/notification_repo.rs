//! Backend adapter for NotificationRepository

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;

use super::client::{eq, BackendClient, Filter};
use super::rows::{decode_rows, NotificationRecord};
use crate::domain::entities::{NotificationId, NotificationRow, UserId};
use crate::domain::ports::NotificationRepository;
use crate::error::DomainError;

const TABLE: &str = "notifications";
/// Embeds the actor's profile through the `actor_id` foreign key
const SELECT: &str = "*,actor:actor_id(id,username,full_name,avatar_url,bio)";

pub struct BackendNotificationRepository {
    client: Arc<BackendClient>,
}

impl BackendNotificationRepository {
    pub fn new(client: Arc<BackendClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl NotificationRepository for BackendNotificationRepository {
    async fn find_for_recipient(
        &self,
        recipient_id: &UserId,
        limit: u32,
    ) -> Result<Vec<NotificationRow>, DomainError> {
        let params: Vec<Filter> = vec![
            ("select".to_string(), SELECT.to_string()),
            eq("recipient_id", recipient_id.as_str()),
            ("order".to_string(), "created_at.desc".to_string()),
            ("limit".to_string(), limit.to_string()),
        ];

        let rows = self.client.select(TABLE, &params).await?;
        Ok(decode_rows::<NotificationRecord>(TABLE, rows)
            .into_iter()
            .map(NotificationRow::from)
            .collect())
    }

    async fn count_unread(&self, recipient_id: &UserId) -> Result<i64, DomainError> {
        let filters = [
            eq("recipient_id", recipient_id.as_str()),
            eq("read", "false"),
        ];
        Ok(self.client.count(TABLE, &filters).await?)
    }

    async fn mark_read(
        &self,
        recipient_id: &UserId,
        id: &NotificationId,
    ) -> Result<bool, DomainError> {
        let filters = [
            eq("id", &id.0),
            eq("recipient_id", recipient_id.as_str()),
        ];

        let updated = self
            .client
            .update(TABLE, &filters, &json!({ "read": true }))
            .await?;

        Ok(!updated.is_empty())
    }

    async fn mark_all_read(&self, recipient_id: &UserId) -> Result<u64, DomainError> {
        let filters = [
            eq("recipient_id", recipient_id.as_str()),
            eq("read", "false"),
        ];

        let updated = self
            .client
            .update(TABLE, &filters, &json!({ "read": true }))
            .await?;

        Ok(updated.len() as u64)
    }
}
