//! The notification capability the queue core programs against.

use async_trait::async_trait;
use std::sync::Mutex;

use crate::adapters::{HttpPushGateway, HttpSmsGateway};
use crate::error::NotificationError;
use crate::types::Notification;
use medq_core::PushSubscription;

/// Fire-and-forget delivery channel for patient notifications.
///
/// Implementations must be thread-safe. Callers are expected to treat every
/// send as best-effort: a failed delivery is logged by the dispatcher and
/// never propagated into queue operations.
#[async_trait]
pub trait NotificationSink: Send + Sync {
    /// Sends a push notification to a registered subscription.
    async fn send_push(
        &self,
        subscription: &PushSubscription,
        notification: &Notification,
    ) -> Result<(), NotificationError>;

    /// Sends an SMS to a phone number on file.
    async fn send_sms(&self, phone: &str, message: &str) -> Result<(), NotificationError>;
}

/// Production sink: push over the subscription endpoint, SMS over the
/// configured gateway.
pub struct HttpNotificationSink {
    push: HttpPushGateway,
    sms: HttpSmsGateway,
}

impl HttpNotificationSink {
    pub fn new(sms_gateway_url: impl Into<String>) -> Self {
        Self {
            push: HttpPushGateway::new(),
            sms: HttpSmsGateway::new(sms_gateway_url),
        }
    }
}

#[async_trait]
impl NotificationSink for HttpNotificationSink {
    async fn send_push(
        &self,
        subscription: &PushSubscription,
        notification: &Notification,
    ) -> Result<(), NotificationError> {
        self.push.send(subscription, notification).await
    }

    async fn send_sms(&self, phone: &str, message: &str) -> Result<(), NotificationError> {
        self.sms.send(phone, message).await
    }
}

/// Sink that drops everything. Used when no channels are configured.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopSink;

#[async_trait]
impl NotificationSink for NoopSink {
    async fn send_push(
        &self,
        _subscription: &PushSubscription,
        _notification: &Notification,
    ) -> Result<(), NotificationError> {
        Ok(())
    }

    async fn send_sms(&self, _phone: &str, _message: &str) -> Result<(), NotificationError> {
        Ok(())
    }
}

/// One delivery captured by [`RecordingSink`].
#[derive(Debug, Clone, PartialEq)]
pub enum SentMessage {
    Push {
        endpoint: String,
        notification: Notification,
    },
    Sms {
        phone: String,
        message: String,
    },
}

/// Sink that records deliveries in memory. Test double for asserting on
/// notification behavior without a network.
#[derive(Debug, Default)]
pub struct RecordingSink {
    sent: Mutex<Vec<SentMessage>>,
    /// When true, every send fails. Exercises the best-effort paths.
    fail_all: bool,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// A sink whose every delivery fails with `SendFailed`.
    pub fn failing() -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            fail_all: true,
        }
    }

    /// Snapshot of everything sent so far, in order.
    pub fn sent(&self) -> Vec<SentMessage> {
        self.sent.lock().expect("sink lock poisoned").clone()
    }

    pub fn clear(&self) {
        self.sent.lock().expect("sink lock poisoned").clear();
    }
}

#[async_trait]
impl NotificationSink for RecordingSink {
    async fn send_push(
        &self,
        subscription: &PushSubscription,
        notification: &Notification,
    ) -> Result<(), NotificationError> {
        if self.fail_all {
            return Err(NotificationError::SendFailed("recording sink set to fail".into()));
        }
        self.sent
            .lock()
            .expect("sink lock poisoned")
            .push(SentMessage::Push {
                endpoint: subscription.endpoint.clone(),
                notification: notification.clone(),
            });
        Ok(())
    }

    async fn send_sms(&self, phone: &str, message: &str) -> Result<(), NotificationError> {
        if self.fail_all {
            return Err(NotificationError::SendFailed("recording sink set to fail".into()));
        }
        self.sent
            .lock()
            .expect("sink lock poisoned")
            .push(SentMessage::Sms {
                phone: phone.to_string(),
                message: message.to_string(),
            });
        Ok(())
    }
}
