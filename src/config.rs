// SPDX-License-Identifier: MIT

//! Application configuration loaded from environment variables.
//!
//! Secrets (portal account, notification token) are read once at startup.
//! Everything else has a sensible default so the poller can run with just
//! the three required variables set.

use std::env;

/// Default portal base URL (Tokyo bike-share service).
pub const DEFAULT_PORTAL_URL: &str = "https://tcc.docomo-cycle.jp/cycle";

/// Default notification webhook endpoint.
pub const DEFAULT_NOTIFY_URL: &str = "https://notify-api.line.me/api/notify";

/// Runtime configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Portal member id (account name)
    pub member_id: String,
    /// Portal account password
    pub password: String,
    /// Bearer token for the notification webhook
    pub notify_token: String,
    /// Portal base URL (no trailing slash)
    pub portal_url: String,
    /// Notification webhook URL
    pub notify_url: String,
    /// Portal service id, embedded in the endpoint path and every payload
    pub service_id: String,
    /// Area id used at login
    pub area_id: String,
    /// Watched station, looked up by name in the parking directory
    pub parking_name: Option<String>,
    /// Watched station id; overrides the directory lookup when set
    pub parking_id: Option<String>,
    /// Path to the generated parking directory JSON
    pub parking_directory: String,
    /// Reserve when available cycles at the station drop below this
    pub reserve_threshold: usize,
    /// Seconds to sleep between polls
    pub poll_interval_secs: u64,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        Ok(Self {
            member_id: env::var("CYCLE_USER").map_err(|_| ConfigError::Missing("CYCLE_USER"))?,
            password: env::var("CYCLE_PASS").map_err(|_| ConfigError::Missing("CYCLE_PASS"))?,
            notify_token: env::var("NOTIFY_TOKEN")
                .map(|v| v.trim().to_string())
                .map_err(|_| ConfigError::Missing("NOTIFY_TOKEN"))?,
            portal_url: env::var("PORTAL_URL")
                .map(|v| v.trim_end_matches('/').to_string())
                .unwrap_or_else(|_| DEFAULT_PORTAL_URL.to_string()),
            notify_url: env::var("NOTIFY_URL").unwrap_or_else(|_| DEFAULT_NOTIFY_URL.to_string()),
            service_id: env::var("SERVICE_ID").unwrap_or_else(|_| "TYO".to_string()),
            area_id: env::var("AREA_ID").unwrap_or_else(|_| "1".to_string()),
            parking_name: env::var("PARKING_NAME").ok(),
            parking_id: env::var("PARKING_ID").ok(),
            parking_directory: env::var("PARKING_DIRECTORY")
                .unwrap_or_else(|_| "data/parking_directory.json".to_string()),
            reserve_threshold: env::var("RESERVE_THRESHOLD")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3),
            poll_interval_secs: env::var("POLL_INTERVAL_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(180),
        })
    }

    /// Default config for tests.
    pub fn test_default() -> Self {
        Self {
            member_id: "test_member".to_string(),
            password: "test_pass".to_string(),
            notify_token: "test_token".to_string(),
            portal_url: DEFAULT_PORTAL_URL.to_string(),
            notify_url: DEFAULT_NOTIFY_URL.to_string(),
            service_id: "TYO".to_string(),
            area_id: "1".to_string(),
            parking_name: None,
            parking_id: Some("10119".to_string()),
            parking_directory: "data/parking_directory.json".to_string(),
            reserve_threshold: 3,
            poll_interval_secs: 180,
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),
}
