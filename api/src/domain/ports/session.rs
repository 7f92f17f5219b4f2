//! Session verification port
//!
//! Sign-in and sign-up live in the hosted backend. This port only turns an
//! access token into the viewer it belongs to.

use async_trait::async_trait;

use crate::domain::entities::Viewer;
use crate::error::DomainError;

#[async_trait]
pub trait SessionVerifier: Send + Sync {
    /// Resolve an access token. `Ok(None)` means the token is invalid or expired.
    async fn verify(&self, access_token: &str) -> Result<Option<Viewer>, DomainError>;
}
