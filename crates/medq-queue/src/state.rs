//! Token state machine.
//!
//! The only place token status and lifecycle timestamps are mutated.
//! Transitions are monotonic: Waiting -> Called -> Completed, with
//! Cancelled reachable from Waiting and Called. Terminal states reject
//! everything.

use medq_core::{Token, TokenStatus, elapsed_whole_minutes};
use time::OffsetDateTime;

use crate::error::{QueueError, Result};

/// Applies `target` to a copy of `token`, stamping timestamps as of `now`.
///
/// On Waiting -> Called, `actual_wait_minutes` is computed once as the
/// floored elapsed minutes since creation; later transitions never touch it.
/// Completed and Cancelled both stamp `completed_at`.
///
/// # Errors
///
/// `InvalidTransition` when the edge is not in the allowed set. The input
/// token is untouched either way.
pub fn apply_transition(token: &Token, target: TokenStatus, now: OffsetDateTime) -> Result<Token> {
    if !token.status.can_transition_to(target) {
        return Err(QueueError::InvalidTransition {
            from: token.status,
            to: target,
        });
    }

    let mut updated = token.clone();
    updated.status = target;
    match target {
        TokenStatus::Called => {
            updated.called_at = Some(now);
            updated.actual_wait_minutes = Some(elapsed_whole_minutes(token.created_at, now));
        }
        TokenStatus::Completed | TokenStatus::Cancelled => {
            updated.completed_at = Some(now);
        }
        TokenStatus::Waiting => unreachable!("no edge leads back to Waiting"),
    }
    Ok(updated)
}

#[cfg(test)]
mod tests {
    use super::*;
    use medq_core::{CounterId, PatientId, Priority, TokenId};
    use time::macros::datetime;

    fn waiting_token() -> Token {
        Token {
            id: TokenId::new(),
            number: 5,
            patient_id: PatientId::new(),
            counter_id: CounterId::new(),
            priority: Priority::Normal,
            status: TokenStatus::Waiting,
            estimated_wait_minutes: 30,
            actual_wait_minutes: None,
            created_at: datetime!(2024-03-10 09:00:00 UTC),
            called_at: None,
            completed_at: None,
        }
    }

    #[test]
    fn test_called_stamps_time_and_actual_wait() {
        // Created 09:00, called 09:22 -> 22 minutes.
        let token = waiting_token();
        let called = apply_transition(
            &token,
            TokenStatus::Called,
            datetime!(2024-03-10 09:22:00 UTC),
        )
        .unwrap();
        assert_eq!(called.status, TokenStatus::Called);
        assert_eq!(called.called_at, Some(datetime!(2024-03-10 09:22:00 UTC)));
        assert_eq!(called.actual_wait_minutes, Some(22));
        assert!(called.completed_at.is_none());
    }

    #[test]
    fn test_actual_wait_floors_partial_minutes() {
        let token = waiting_token();
        let called = apply_transition(
            &token,
            TokenStatus::Called,
            datetime!(2024-03-10 09:22:59 UTC),
        )
        .unwrap();
        assert_eq!(called.actual_wait_minutes, Some(22));
    }

    #[test]
    fn test_completed_preserves_actual_wait() {
        // Actual wait is computed once and never altered afterwards.
        let token = waiting_token();
        let called = apply_transition(
            &token,
            TokenStatus::Called,
            datetime!(2024-03-10 09:22:00 UTC),
        )
        .unwrap();
        let completed = apply_transition(
            &called,
            TokenStatus::Completed,
            datetime!(2024-03-10 09:45:00 UTC),
        )
        .unwrap();
        assert_eq!(completed.actual_wait_minutes, Some(22));
        assert_eq!(
            completed.completed_at,
            Some(datetime!(2024-03-10 09:45:00 UTC))
        );
        assert_eq!(completed.called_at, Some(datetime!(2024-03-10 09:22:00 UTC)));
    }

    #[test]
    fn test_immediate_cancel_leaves_call_fields_unset() {
        // Waiting -> Cancelled never touches calledAt/actualWait.
        let token = waiting_token();
        let cancelled = apply_transition(
            &token,
            TokenStatus::Cancelled,
            datetime!(2024-03-10 09:01:00 UTC),
        )
        .unwrap();
        assert_eq!(cancelled.status, TokenStatus::Cancelled);
        assert!(cancelled.called_at.is_none());
        assert!(cancelled.actual_wait_minutes.is_none());
        assert_eq!(
            cancelled.completed_at,
            Some(datetime!(2024-03-10 09:01:00 UTC))
        );
    }

    #[test]
    fn test_waiting_cannot_complete_directly() {
        let token = waiting_token();
        let err = apply_transition(
            &token,
            TokenStatus::Completed,
            datetime!(2024-03-10 09:05:00 UTC),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            QueueError::InvalidTransition {
                from: TokenStatus::Waiting,
                to: TokenStatus::Completed,
            }
        ));
    }

    #[test]
    fn test_terminal_states_reject_all_targets() {
        // Once terminal, every transition attempt fails and the token
        // is untouched (apply_transition never mutates its input).
        let token = waiting_token();
        let now = datetime!(2024-03-10 10:00:00 UTC);
        let cancelled = apply_transition(&token, TokenStatus::Cancelled, now).unwrap();
        for target in [
            TokenStatus::Waiting,
            TokenStatus::Called,
            TokenStatus::Completed,
            TokenStatus::Cancelled,
        ] {
            let err = apply_transition(&cancelled, target, now).unwrap_err();
            assert!(matches!(err, QueueError::InvalidTransition { .. }));
        }
    }
}
