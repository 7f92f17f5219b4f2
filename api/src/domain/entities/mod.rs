//! Domain entities
//!
//! Read-only snapshots of backend rows, normalized at the adapter boundary.

pub mod follow;
pub mod notification;
pub mod post;
pub mod profile;

pub use follow::FollowEdge;
pub use notification::{NotificationId, NotificationPayload, NotificationRow, NotificationType};
pub use post::{Attachment, AttachmentKind, Post, PostId};
pub use profile::{AuthorCounts, Profile, UserId, Viewer};
