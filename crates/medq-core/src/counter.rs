use crate::id::{CategoryId, CounterId};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Lifecycle status of a counter. The router only considers Active counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CounterStatus {
    #[default]
    Active,
    Inactive,
}

/// A physical service counter belonging to exactly one category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Counter {
    pub id: CounterId,
    pub name: String,
    pub category_id: CategoryId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    /// Staff member currently assigned to this counter, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned_staff: Option<String>,
    pub status: CounterStatus,
    /// Creation order doubles as the stable tie-break order for routing.
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl Counter {
    pub fn is_active(&self) -> bool {
        matches!(self.status, CounterStatus::Active)
    }
}
