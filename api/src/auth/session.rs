//! Bearer session authentication middleware

use axum::{body::Body, extract::State, http::Request, middleware::Next, response::Response};

use crate::domain::ports::SessionVerifier;
use crate::error::AppError;
use crate::AppState;

/// Extract the access token from the Authorization header
fn extract_bearer_token(request: &Request<Body>) -> Option<&str> {
    request
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

/// Authentication middleware
///
/// Verifies the access token with the hosted backend and injects the
/// `Viewer` into request extensions.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let token = extract_bearer_token(&request)
        .ok_or(AppError::Unauthorized)?
        .to_string();

    let viewer = state
        .sessions
        .verify(&token)
        .await?
        .ok_or(AppError::Unauthorized)?;

    tracing::debug!(viewer = %viewer.id, "Authenticated request");
    request.extensions_mut().insert(viewer);

    Ok(next.run(request).await)
}
