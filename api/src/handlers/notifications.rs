//! Notification handlers

use axum::{
    extract::{Path, Query, State},
    Extension, Json,
};
use serde::{Deserialize, Serialize};

use crate::app::notification_service::NotificationList;
use crate::domain::entities::{NotificationId, Viewer};
use crate::error::AppError;
use crate::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct NotificationQuery {
    pub limit: Option<u32>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UnreadCountResponse {
    pub unread_count: i64,
}

#[derive(Serialize)]
pub struct MarkReadResponse {
    pub success: bool,
    pub updated: u64,
}

/// GET /notifications
pub async fn list_notifications(
    State(state): State<AppState>,
    Extension(viewer): Extension<Viewer>,
    Query(query): Query<NotificationQuery>,
) -> Result<Json<NotificationList>, AppError> {
    let list = state
        .notification_service
        .list(&viewer, query.limit)
        .await?;

    Ok(Json(list))
}

/// GET /notifications/unread-count
pub async fn unread_count(
    State(state): State<AppState>,
    Extension(viewer): Extension<Viewer>,
) -> Result<Json<UnreadCountResponse>, AppError> {
    let unread_count = state.notification_service.unread_count(&viewer).await?;
    Ok(Json(UnreadCountResponse { unread_count }))
}

/// POST /notifications/:id/read
pub async fn mark_read(
    State(state): State<AppState>,
    Extension(viewer): Extension<Viewer>,
    Path(id): Path<String>,
) -> Result<Json<MarkReadResponse>, AppError> {
    state
        .notification_service
        .mark_read(&viewer, &NotificationId(id))
        .await?;

    Ok(Json(MarkReadResponse {
        success: true,
        updated: 1,
    }))
}

/// POST /notifications/read-all
pub async fn mark_all_read(
    State(state): State<AppState>,
    Extension(viewer): Extension<Viewer>,
) -> Result<Json<MarkReadResponse>, AppError> {
    let updated = state.notification_service.mark_all_read(&viewer).await?;

    Ok(Json(MarkReadResponse {
        success: true,
        updated,
    }))
}
