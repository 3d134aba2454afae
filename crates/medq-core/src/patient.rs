use crate::id::PatientId;
use serde::{Deserialize, Serialize};

/// A patient as seen by the queue core: identity plus notification channels.
/// The full patient record lives in the external directory; the core only
/// needs what it takes to route and notify.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Patient {
    pub id: PatientId,
    pub name: String,
    /// Phone number for SMS milestones. Absence is not an error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// Registered push channel. Absence is not an error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub push_subscription: Option<PushSubscription>,
}

/// A web-push style subscription: the endpoint the push gateway delivers to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PushSubscription {
    pub endpoint: String,
}
