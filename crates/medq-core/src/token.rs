use crate::error::{CoreError, Result};
use crate::id::{CounterId, PatientId, TokenId};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use time::OffsetDateTime;

/// Token priority. Urgent tokens are served before normal ones regardless of
/// arrival time; the derive order makes `Urgent < Normal` so an ascending
/// sort on `(priority, created_at)` yields the authoritative queue order.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Priority {
    Urgent,
    #[default]
    Normal,
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Urgent => write!(f, "URGENT"),
            Self::Normal => write!(f, "NORMAL"),
        }
    }
}

impl FromStr for Priority {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_uppercase().as_str() {
            "URGENT" => Ok(Self::Urgent),
            "NORMAL" => Ok(Self::Normal),
            other => Err(CoreError::invalid_priority(other)),
        }
    }
}

/// Lifecycle status of a token.
///
/// Waiting is the only initial state. Completed and Cancelled are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TokenStatus {
    Waiting,
    Called,
    Completed,
    Cancelled,
}

impl TokenStatus {
    /// Terminal states admit no further transitions.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled)
    }

    /// Whether a token in this status counts toward a counter's backlog.
    pub fn is_in_queue(&self) -> bool {
        matches!(self, Self::Waiting | Self::Called)
    }

    /// The allowed state-machine edges:
    /// Waiting -> Called | Cancelled, Called -> Completed | Cancelled.
    pub fn can_transition_to(&self, target: TokenStatus) -> bool {
        matches!(
            (self, target),
            (Self::Waiting, Self::Called)
                | (Self::Waiting, Self::Cancelled)
                | (Self::Called, Self::Completed)
                | (Self::Called, Self::Cancelled)
        )
    }
}

impl fmt::Display for TokenStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Waiting => write!(f, "WAITING"),
            Self::Called => write!(f, "CALLED"),
            Self::Completed => write!(f, "COMPLETED"),
            Self::Cancelled => write!(f, "CANCELLED"),
        }
    }
}

impl FromStr for TokenStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_uppercase().as_str() {
            "WAITING" => Ok(Self::Waiting),
            "CALLED" => Ok(Self::Called),
            "COMPLETED" => Ok(Self::Completed),
            "CANCELLED" => Ok(Self::Cancelled),
            other => Err(CoreError::invalid_status(other)),
        }
    }
}

/// One patient's queue ticket.
///
/// `number` is the user-facing display number: unique per calendar day across
/// the whole facility, never per counter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Token {
    pub id: TokenId,
    pub number: u32,
    pub patient_id: PatientId,
    pub counter_id: CounterId,
    pub priority: Priority,
    pub status: TokenStatus,
    /// Estimated wait in minutes, computed once at creation.
    pub estimated_wait_minutes: u32,
    /// Actual wait in minutes, set exactly once on the Waiting -> Called
    /// transition and never recomputed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actual_wait_minutes: Option<u32>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(default, with = "time::serde::rfc3339::option")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub called_at: Option<OffsetDateTime>,
    #[serde(default, with = "time::serde::rfc3339::option")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<OffsetDateTime>,
}

impl Token {
    /// Sort key for the per-counter waiting set: priority first (urgent
    /// ahead), then arrival time. Immutable once the token exists, so the
    /// queue order is stable.
    pub fn queue_key(&self) -> (Priority, OffsetDateTime, u32) {
        // Token number breaks created_at ties deterministically.
        (self.priority, self.created_at, self.number)
    }
}
