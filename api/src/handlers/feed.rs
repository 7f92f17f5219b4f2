//! Feed handlers
//!
//! Home feed and profile header endpoints.

use axum::{
    extract::{Path, Query, State},
    Extension, Json,
};
use serde::Deserialize;

use crate::app::feed_service::{Feed, ProfileSummary};
use crate::domain::entities::{UserId, Viewer};
use crate::error::AppError;
use crate::AppState;

/// Query parameters for GET /feed
#[derive(Debug, Default, Deserialize)]
pub struct FeedQuery {
    pub limit: Option<u32>,
    #[serde(default)]
    pub offset: u32,
}

/// GET /feed
///
/// Recent posts for the authenticated viewer, followed authors first.
pub async fn get_feed(
    State(state): State<AppState>,
    Extension(viewer): Extension<Viewer>,
    Query(query): Query<FeedQuery>,
) -> Result<Json<Feed>, AppError> {
    let feed = state
        .feed_service
        .generate_feed(&viewer, query.limit, query.offset)
        .await?;

    Ok(Json(feed))
}

/// GET /profiles/:id
pub async fn get_profile(
    State(state): State<AppState>,
    Extension(viewer): Extension<Viewer>,
    Path(id): Path<String>,
) -> Result<Json<ProfileSummary>, AppError> {
    if id.trim().is_empty() {
        return Err(AppError::BadRequest("Profile id is required".to_string()));
    }

    let summary = state
        .feed_service
        .profile_summary(&viewer, &UserId(id))
        .await?;

    Ok(Json(summary))
}
