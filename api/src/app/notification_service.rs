//! Notification service
//!
//! Loads a viewer's notifications and maps them for display.

use std::sync::Arc;

use serde::Serialize;

use super::notification_mapper::{map_notification, AppNotification};
use crate::domain::entities::{NotificationId, Viewer};
use crate::domain::ports::{Clock, NotificationRepository, RelativeTimeFormatter};
use crate::error::{AppError, DomainError};

pub const DEFAULT_NOTIFICATION_LIMIT: u32 = 50;
pub const MAX_NOTIFICATION_LIMIT: u32 = 200;

/// The viewer's notification list
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationList {
    pub notifications: Vec<AppNotification>,
    pub unread_count: i64,
}

pub struct NotificationService<NR, C, F>
where
    NR: NotificationRepository,
    C: Clock,
    F: RelativeTimeFormatter,
{
    notifications: Arc<NR>,
    clock: Arc<C>,
    formatter: Arc<F>,
    default_limit: u32,
}

impl<NR, C, F> NotificationService<NR, C, F>
where
    NR: NotificationRepository,
    C: Clock,
    F: RelativeTimeFormatter,
{
    pub fn new(notifications: Arc<NR>, clock: Arc<C>, formatter: Arc<F>) -> Self {
        Self {
            notifications,
            clock,
            formatter,
            default_limit: DEFAULT_NOTIFICATION_LIMIT,
        }
    }

    pub fn with_default_limit(mut self, limit: u32) -> Self {
        self.default_limit = limit.clamp(1, MAX_NOTIFICATION_LIMIT);
        self
    }

    /// Newest notifications first, with the unread total
    pub async fn list(
        &self,
        viewer: &Viewer,
        limit: Option<u32>,
    ) -> Result<NotificationList, AppError> {
        let limit = limit
            .unwrap_or(self.default_limit)
            .clamp(1, MAX_NOTIFICATION_LIMIT);

        let (rows, unread_count) = tokio::try_join!(
            self.notifications.find_for_recipient(&viewer.id, limit),
            self.notifications.count_unread(&viewer.id),
        )?;

        // One clock reading per request keeps every label consistent
        let now = self.clock.now();
        let notifications = rows
            .iter()
            .map(|row| map_notification(row, now, self.formatter.as_ref()))
            .collect();

        Ok(NotificationList {
            notifications,
            unread_count,
        })
    }

    pub async fn unread_count(&self, viewer: &Viewer) -> Result<i64, AppError> {
        Ok(self.notifications.count_unread(&viewer.id).await?)
    }

    /// Mark one of the viewer's notifications read
    pub async fn mark_read(&self, viewer: &Viewer, id: &NotificationId) -> Result<(), AppError> {
        let updated = self.notifications.mark_read(&viewer.id, id).await?;
        if !updated {
            return Err(DomainError::NotFound(format!("Notification {}", id)).into());
        }
        tracing::debug!(viewer = %viewer.id, notification = %id, "Marked notification read");
        Ok(())
    }

    /// Mark everything read, returning how many notifications changed
    pub async fn mark_all_read(&self, viewer: &Viewer) -> Result<u64, AppError> {
        let updated = self.notifications.mark_all_read(&viewer.id).await?;
        tracing::debug!(viewer = %viewer.id, updated, "Marked all notifications read");
        Ok(updated)
    }
}
