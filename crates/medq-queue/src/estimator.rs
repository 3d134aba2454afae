//! Wait-time estimator.
//!
//! Scores a counter's load as `average_wait * backlog`: a proxy for the
//! total minutes of service already queued ahead of a new arrival. Lower is
//! better; a counter with zero backlog scores 0 and therefore always beats
//! any counter with backlog. The estimator never fails, it only falls back
//! to more conservative averages.

use medq_core::{Token, TokenStatus};

/// Default per-patient service time when no completion history exists yet
/// (start of day, or a freshly opened counter).
pub const DEFAULT_WAIT_MINUTES: f64 = 15.0;

/// Count of tokens currently occupying the counter (Waiting or Called).
pub fn backlog(tokens: &[Token]) -> usize {
    tokens.iter().filter(|t| t.status.is_in_queue()).count()
}

/// Mean actual wait over completed tokens, or `None` when nothing has
/// completed yet.
pub fn average_completed_wait(tokens: &[Token]) -> Option<f64> {
    let waits: Vec<u32> = tokens
        .iter()
        .filter(|t| t.status == TokenStatus::Completed)
        .filter_map(|t| t.actual_wait_minutes)
        .collect();
    if waits.is_empty() {
        return None;
    }
    Some(waits.iter().map(|&w| f64::from(w)).sum::<f64>() / waits.len() as f64)
}

/// Load score for one counter given its today-scoped tokens.
///
/// `global_average` is the same-day average across all counters, used when
/// this counter has no completions of its own.
pub fn counter_load(counter_tokens: &[Token], global_average: Option<f64>) -> f64 {
    let waiting = backlog(counter_tokens);
    if waiting == 0 {
        // Empty counters are maximally preferred regardless of history.
        return 0.0;
    }
    let average = average_completed_wait(counter_tokens)
        .or(global_average)
        .unwrap_or(DEFAULT_WAIT_MINUTES);
    average * waiting as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use medq_core::{CounterId, PatientId, Priority, TokenId};
    use time::macros::datetime;

    fn token(status: TokenStatus, actual_wait: Option<u32>) -> Token {
        Token {
            id: TokenId::new(),
            number: 1,
            patient_id: PatientId::new(),
            counter_id: CounterId::new(),
            priority: Priority::Normal,
            status,
            estimated_wait_minutes: 15,
            actual_wait_minutes: actual_wait,
            created_at: datetime!(2024-03-10 09:00:00 UTC),
            called_at: None,
            completed_at: None,
        }
    }

    #[test]
    fn test_backlog_counts_waiting_and_called() {
        let tokens = vec![
            token(TokenStatus::Waiting, None),
            token(TokenStatus::Called, Some(5)),
            token(TokenStatus::Completed, Some(10)),
            token(TokenStatus::Cancelled, None),
        ];
        assert_eq!(backlog(&tokens), 2);
    }

    #[test]
    fn test_average_over_completed_only() {
        let tokens = vec![
            token(TokenStatus::Completed, Some(10)),
            token(TokenStatus::Completed, Some(30)),
            // Called tokens have a wait on record but are not completions.
            token(TokenStatus::Called, Some(90)),
        ];
        assert_eq!(average_completed_wait(&tokens), Some(20.0));
    }

    #[test]
    fn test_average_none_without_completions() {
        let tokens = vec![token(TokenStatus::Waiting, None)];
        assert_eq!(average_completed_wait(&tokens), None);
    }

    #[test]
    fn test_empty_counter_scores_zero_regardless_of_history() {
        let tokens = vec![
            token(TokenStatus::Completed, Some(120)),
            token(TokenStatus::Completed, Some(90)),
        ];
        assert_eq!(counter_load(&tokens, Some(50.0)), 0.0);
    }

    #[test]
    fn test_score_is_average_times_backlog() {
        // 2 waiting, average 20 -> 40.
        let tokens = vec![
            token(TokenStatus::Waiting, None),
            token(TokenStatus::Waiting, None),
            token(TokenStatus::Completed, Some(20)),
        ];
        assert_eq!(counter_load(&tokens, None), 40.0);
    }

    #[test]
    fn test_falls_back_to_global_average() {
        let tokens = vec![token(TokenStatus::Waiting, None)];
        assert_eq!(counter_load(&tokens, Some(25.0)), 25.0);
    }

    #[test]
    fn test_falls_back_to_default_without_any_history() {
        let tokens = vec![
            token(TokenStatus::Waiting, None),
            token(TokenStatus::Waiting, None),
        ];
        assert_eq!(counter_load(&tokens, None), 2.0 * DEFAULT_WAIT_MINUTES);
    }
}
