//! AI Cookbook API Server
//!
//! Read-side API for the AI Cookbook prompt-sharing app: the home feed,
//! profile headers and notifications. Tables, auth and storage live in a
//! hosted backend; this service shapes its rows for display.
//! Uses hexagonal (ports & adapters) architecture for clean separation of concerns.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use axum::{
    middleware,
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod adapters;
mod app;
mod auth;
mod config;
mod domain;
mod error;
mod handlers;

#[cfg(test)]
mod test_utils;

#[cfg(test)]
mod integration_tests;

use adapters::{
    BackendClient, BackendFollowRepository, BackendNotificationRepository, BackendPostRepository,
    BackendProfileRepository, BackendSessionVerifier, EnglishRelativeTime, SystemClock,
};
use app::{FeedService, NotificationService};
use config::Config;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub feed_service: Arc<
        FeedService<BackendPostRepository, BackendProfileRepository, BackendFollowRepository>,
    >,
    pub notification_service:
        Arc<NotificationService<BackendNotificationRepository, SystemClock, EnglishRelativeTime>>,
    pub sessions: Arc<BackendSessionVerifier>,
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,cookbook_api=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Cookbook API...");

    let config = Config::from_env()?;

    // One client per process, handed to every adapter
    let backend = Arc::new(BackendClient::new(
        config.backend_url.clone(),
        config.backend_anon_key.clone(),
        config.read_key().to_string(),
    ));
    tracing::info!(backend = %config.backend_url, "Backend client configured");

    // Create adapters
    let post_repo = Arc::new(BackendPostRepository::new(backend.clone()));
    let profile_repo = Arc::new(BackendProfileRepository::new(backend.clone()));
    let follow_repo = Arc::new(BackendFollowRepository::new(backend.clone()));
    let notification_repo = Arc::new(BackendNotificationRepository::new(backend.clone()));
    let sessions = Arc::new(BackendSessionVerifier::new(backend.clone()));

    // Create application services
    let feed_service = Arc::new(
        FeedService::new(post_repo, profile_repo, follow_repo)
            .with_default_limit(config.feed_page_size),
    );

    let notification_service = Arc::new(
        NotificationService::new(
            notification_repo,
            Arc::new(SystemClock),
            Arc::new(EnglishRelativeTime),
        )
        .with_default_limit(config.notification_page_size),
    );

    let state = AppState {
        feed_service,
        notification_service,
        sessions,
    };

    // Build router
    let app = Router::new()
        // Health check (no auth)
        .route("/health", get(health))
        // Protected routes
        .merge(
            Router::new()
                .route("/feed", get(handlers::get_feed))
                .route("/profiles/:id", get(handlers::get_profile))
                .route("/notifications", get(handlers::list_notifications))
                .route("/notifications/unread-count", get(handlers::unread_count))
                .route("/notifications/read-all", post(handlers::mark_all_read))
                .route("/notifications/:id/read", post(handlers::mark_read))
                .layer(middleware::from_fn_with_state(
                    state.clone(),
                    auth::auth_middleware,
                )),
        )
        // Middleware
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(listener, app)
        .await
        .context("Server error")?;

    Ok(())
}
