//! Application layer
//!
//! Contains use cases and service orchestration.
//! `feed_assembler` and `notification_mapper` are pure; the services fetch
//! rows through the ports and feed them in.

pub mod feed_assembler;
pub mod feed_service;
pub mod notification_mapper;
pub mod notification_service;

pub use feed_service::FeedService;
pub use notification_service::NotificationService;
