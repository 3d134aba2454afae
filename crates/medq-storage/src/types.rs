//! Write-model types shared between the queue core and storage backends.

use medq_core::{CounterId, PatientId, Priority, Token, TokenId, TokenStatus};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Everything the router decides about a new token before the store assigns
/// its identity. Status is implicitly Waiting: a token is created exactly
/// once, in the initial state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewToken {
    /// Facility-wide daily sequence number, obtained from
    /// [`TokenStore::next_token_number`](crate::TokenStore::next_token_number).
    pub number: u32,
    pub patient_id: PatientId,
    pub counter_id: CounterId,
    pub priority: Priority,
    pub estimated_wait_minutes: u32,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl NewToken {
    /// Materializes the stored token row for this write.
    pub fn into_token(self, id: TokenId) -> Token {
        Token {
            id,
            number: self.number,
            patient_id: self.patient_id,
            counter_id: self.counter_id,
            priority: self.priority,
            status: TokenStatus::Waiting,
            estimated_wait_minutes: self.estimated_wait_minutes,
            actual_wait_minutes: None,
            created_at: self.created_at,
            called_at: None,
            completed_at: None,
        }
    }
}
