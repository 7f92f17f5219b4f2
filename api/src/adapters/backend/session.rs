//! Backend adapter for SessionVerifier

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use super::client::{AuthUser, BackendClient};
use crate::domain::entities::profile::non_blank;
use crate::domain::entities::{UserId, Viewer};
use crate::domain::ports::SessionVerifier;
use crate::error::DomainError;

pub struct BackendSessionVerifier {
    client: Arc<BackendClient>,
}

impl BackendSessionVerifier {
    pub fn new(client: Arc<BackendClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl SessionVerifier for BackendSessionVerifier {
    async fn verify(&self, access_token: &str) -> Result<Option<Viewer>, DomainError> {
        let user = self.client.auth_user(access_token).await?;
        Ok(user.and_then(viewer_from_auth_user))
    }
}

/// Display name from sign-up metadata, falling back to the email's local part
fn viewer_from_auth_user(user: AuthUser) -> Option<Viewer> {
    if user.id.trim().is_empty() {
        return None;
    }

    let metadata = |key: &str| match user.user_metadata.get(key) {
        Some(Value::String(s)) => non_blank(Some(s.as_str())).map(str::to_string),
        _ => None,
    };

    let display_name = metadata("full_name")
        .or_else(|| metadata("name"))
        .or_else(|| metadata("username"))
        .or_else(|| {
            user.email
                .as_deref()
                .and_then(|email| email.split('@').next())
                .and_then(|local| non_blank(Some(local)))
                .map(str::to_string)
        });

    Some(Viewer {
        id: UserId(user.id),
        display_name,
    })
}
