//! Domain ports (traits)
//!
//! Port traits define interfaces that the domain layer requires.
//! Adapters provide concrete implementations of these traits.

pub mod repositories;
pub mod session;
pub mod time;

pub use repositories::{
    FollowRepository, NotificationRepository, PostRepository, ProfileRepository,
};
pub use session::SessionVerifier;
pub use time::{Clock, RelativeTimeFormatter, RelativeUnit};
