//! Hosted backend adapter
//!
//! REST client for the backend's table and auth APIs, plus the repository
//! implementations built on it.

pub mod client;
pub mod follow_repo;
pub mod notification_repo;
pub mod post_repo;
pub mod profile_repo;
pub mod rows;
pub mod session;

pub use client::BackendClient;
pub use follow_repo::BackendFollowRepository;
pub use notification_repo::BackendNotificationRepository;
pub use post_repo::BackendPostRepository;
pub use profile_repo::BackendProfileRepository;
pub use session::BackendSessionVerifier;
