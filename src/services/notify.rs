// SPDX-License-Identifier: MIT

//! Push-notification webhook client.
//!
//! The webhook takes a bearer-token-authorized POST with a single text
//! field; that is the whole interface.

/// Notification webhook client.
#[derive(Clone)]
pub struct NotifyClient {
    http: reqwest::Client,
    url: String,
    token: String,
}

impl NotifyClient {
    pub fn new(url: String, token: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            url,
            token,
        }
    }

    /// Send a plain-text message.
    pub async fn send_message(&self, message: &str) -> Result<(), NotifyError> {
        let response = self
            .http
            .post(&self.url)
            .bearer_auth(&self.token)
            .form(&[("message", message)])
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            return Err(NotifyError::Status(status));
        }
        Ok(())
    }
}

/// Webhook delivery errors.
#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    #[error("notify webhook answered HTTP status {0}")]
    Status(reqwest::StatusCode),

    #[error("notify transport error: {0}")]
    Transport(#[from] reqwest::Error),
}
