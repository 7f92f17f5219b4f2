use std::env;

use anyhow::Context;

const DEFAULT_FEED_PAGE_SIZE: u32 = 20;
const DEFAULT_NOTIFICATION_PAGE_SIZE: u32 = 50;

#[derive(Clone)]
pub struct Config {
    /// Base URL of the hosted backend (REST + auth live under it)
    pub backend_url: String,
    /// Public anon key, sent as `apikey` on every backend request
    pub backend_anon_key: String,
    /// Service key for repository reads; falls back to the anon key
    pub backend_service_key: Option<String>,
    pub port: u16,
    pub feed_page_size: u32,
    pub notification_page_size: u32,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        Ok(Self {
            backend_url: env::var("BACKEND_URL").context("BACKEND_URL must be set")?,
            backend_anon_key: env::var("BACKEND_ANON_KEY")
                .context("BACKEND_ANON_KEY must be set")?,
            backend_service_key: env::var("BACKEND_SERVICE_KEY")
                .ok()
                .filter(|k| !k.is_empty()),
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            feed_page_size: env::var("FEED_PAGE_SIZE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_FEED_PAGE_SIZE),
            notification_page_size: env::var("NOTIFICATION_PAGE_SIZE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_NOTIFICATION_PAGE_SIZE),
        })
    }

    /// Key used for table reads
    pub fn read_key(&self) -> &str {
        self.backend_service_key
            .as_deref()
            .unwrap_or(&self.backend_anon_key)
    }
}
