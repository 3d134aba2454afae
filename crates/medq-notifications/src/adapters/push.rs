use reqwest::Client;
use serde_json::json;

use crate::error::NotificationError;
use crate::types::Notification;
use medq_core::PushSubscription;

/// Delivers push notifications by POSTing JSON to the subscription endpoint.
///
/// The endpoint is whatever the patient's device registered (a web-push relay
/// or an app gateway); this adapter treats it as an opaque URL.
pub struct HttpPushGateway {
    http_client: Client,
}

impl HttpPushGateway {
    /// # Panics
    ///
    /// Panics if the HTTP client cannot be created (should not happen in
    /// practice).
    #[must_use]
    pub fn new() -> Self {
        let http_client = Client::builder()
            .timeout(super::REQUEST_TIMEOUT)
            .build()
            .expect("Failed to create HTTP client");
        Self { http_client }
    }

    pub async fn send(
        &self,
        subscription: &PushSubscription,
        notification: &Notification,
    ) -> Result<(), NotificationError> {
        let payload = json!({
            "kind": notification.kind,
            "title": notification.title,
            "body": notification.body,
            "tokenNumber": notification.token_number,
        });

        let response = self
            .http_client
            .post(&subscription.endpoint)
            .json(&payload)
            .send()
            .await
            .map_err(|e| NotificationError::SendFailed(e.to_string()))?;

        if !response.status().is_success() {
            return Err(NotificationError::SendFailed(format!(
                "push endpoint returned {}",
                response.status()
            )));
        }
        Ok(())
    }
}

impl Default for HttpPushGateway {
    fn default() -> Self {
        Self::new()
    }
}
