//! HTTP handlers
//!
//! Axum request handlers for the API endpoints.

pub mod feed;
pub mod notifications;

pub use feed::{get_feed, get_profile};
pub use notifications::{list_notifications, mark_all_read, mark_read, unread_count};
