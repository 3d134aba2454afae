//! Best-effort delivery wrapper.
//!
//! Every queue-side notification goes through here. Delivery failures are
//! logged at `warn` and swallowed: a down push relay or SMS gateway must
//! never abort the token operation that triggered the notification. Each
//! delivery is additionally bounded by a timeout, so a channel that hangs
//! instead of failing cannot stall the operation either.

use std::sync::Arc;
use std::time::Duration;

use tokio::time::timeout;

use crate::sink::NotificationSink;
use crate::types::Notification;
use medq_core::Patient;

/// Upper bound on a single delivery attempt. The HTTP adapters carry their
/// own request timeout; this bound also covers non-HTTP sinks and DNS
/// stalls.
const DELIVERY_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Clone)]
pub struct Dispatcher {
    sink: Arc<dyn NotificationSink>,
    delivery_timeout: Duration,
}

impl Dispatcher {
    pub fn new(sink: Arc<dyn NotificationSink>) -> Self {
        Self {
            sink,
            delivery_timeout: DELIVERY_TIMEOUT,
        }
    }

    /// Replaces the per-delivery bound.
    pub fn with_timeout(mut self, bound: Duration) -> Self {
        self.delivery_timeout = bound;
        self
    }

    /// Push `notification` to the patient, if they registered a channel.
    /// Absence of a subscription is not an error; it is silently skipped.
    pub async fn push_to(&self, patient: &Patient, notification: &Notification) {
        let Some(ref subscription) = patient.push_subscription else {
            return;
        };
        let send = self.sink.send_push(subscription, notification);
        match timeout(self.delivery_timeout, send).await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => {
                tracing::warn!(
                    patient = %patient.id,
                    kind = ?notification.kind,
                    error = %e,
                    "push notification delivery failed"
                );
            }
            Err(_) => {
                tracing::warn!(
                    patient = %patient.id,
                    kind = ?notification.kind,
                    "push notification delivery timed out"
                );
            }
        }
    }

    /// SMS `notification` to the patient, if a phone number is on file.
    pub async fn sms_to(&self, patient: &Patient, notification: &Notification) {
        let Some(ref phone) = patient.phone else {
            return;
        };
        let text = notification.as_sms_text();
        let send = self.sink.send_sms(phone, &text);
        match timeout(self.delivery_timeout, send).await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => {
                tracing::warn!(
                    patient = %patient.id,
                    kind = ?notification.kind,
                    error = %e,
                    "SMS notification delivery failed"
                );
            }
            Err(_) => {
                tracing::warn!(
                    patient = %patient.id,
                    kind = ?notification.kind,
                    "SMS notification delivery timed out"
                );
            }
        }
    }
}
