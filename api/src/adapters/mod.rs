//! Adapters layer
//!
//! Implementations of port traits for external systems.

pub mod backend;
pub mod time;

pub use backend::{
    BackendClient, BackendFollowRepository, BackendNotificationRepository, BackendPostRepository,
    BackendProfileRepository, BackendSessionVerifier,
};
pub use time::{EnglishRelativeTime, SystemClock};
