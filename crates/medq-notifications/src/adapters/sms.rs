use reqwest::Client;
use serde_json::json;

use crate::error::NotificationError;

/// Delivers SMS through an HTTP gateway (`POST {to, message}`).
pub struct HttpSmsGateway {
    http_client: Client,
    gateway_url: String,
}

impl HttpSmsGateway {
    /// # Panics
    ///
    /// Panics if the HTTP client cannot be created (should not happen in
    /// practice).
    #[must_use]
    pub fn new(gateway_url: impl Into<String>) -> Self {
        let http_client = Client::builder()
            .timeout(super::REQUEST_TIMEOUT)
            .build()
            .expect("Failed to create HTTP client");
        Self {
            http_client,
            gateway_url: gateway_url.into(),
        }
    }

    pub async fn send(&self, phone: &str, message: &str) -> Result<(), NotificationError> {
        if self.gateway_url.is_empty() {
            return Err(NotificationError::InvalidConfig(
                "SMS gateway URL is not configured".into(),
            ));
        }

        let payload = json!({
            "to": phone,
            "message": message,
        });

        let response = self
            .http_client
            .post(&self.gateway_url)
            .json(&payload)
            .send()
            .await
            .map_err(|e| NotificationError::SendFailed(e.to_string()))?;

        if !response.status().is_success() {
            return Err(NotificationError::SendFailed(format!(
                "SMS gateway returned {}",
                response.status()
            )));
        }
        Ok(())
    }
}
