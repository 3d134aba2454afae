//! Counter selection and initial wait estimation.
//!
//! The I/O orchestration lives in [`crate::service`]; this module holds the
//! pure decisions so they can be tested without a store.

use medq_core::Counter;

/// Minutes budgeted per queued patient when estimating a new arrival's wait.
pub const ESTIMATE_SLOT_MINUTES: u32 = 15;

/// How many times a storage-level numbering conflict is retried before the
/// arrival is failed with `RoutingFailed`.
pub const MAX_CREATE_ATTEMPTS: u32 = 3;

/// Picks the candidate with the lowest load score.
///
/// Candidates arrive in counter-creation order and the comparison is strict,
/// so ties consistently resolve to the first-created counter.
pub fn select_counter(scored: &[(Counter, f64)]) -> Option<&Counter> {
    let mut best: Option<(&Counter, f64)> = None;
    for (counter, score) in scored {
        match best {
            Some((_, best_score)) if *score >= best_score => {}
            _ => best = Some((counter, *score)),
        }
    }
    best.map(|(counter, _)| counter)
}

/// Initial estimate shown on the token: one slot per patient already in the
/// chosen counter's queue, floored at a single slot.
pub fn initial_estimate(backlog_before_insert: usize) -> u32 {
    let queued = backlog_before_insert as u32 * ESTIMATE_SLOT_MINUTES;
    queued.max(ESTIMATE_SLOT_MINUTES)
}

#[cfg(test)]
mod tests {
    use super::*;
    use medq_core::{CategoryId, CounterId, CounterStatus};
    use time::macros::datetime;

    fn counter(name: &str) -> Counter {
        Counter {
            id: CounterId::new(),
            name: name.into(),
            category_id: CategoryId::new(),
            department: None,
            assigned_staff: None,
            status: CounterStatus::Active,
            created_at: datetime!(2024-01-01 08:00:00 UTC),
        }
    }

    #[test]
    fn test_select_minimum_score() {
        let scored = vec![(counter("A"), 40.0), (counter("B"), 0.0), (counter("C"), 15.0)];
        assert_eq!(select_counter(&scored).unwrap().name, "B");
    }

    #[test]
    fn test_tie_resolves_to_first_encountered() {
        let scored = vec![(counter("A"), 30.0), (counter("B"), 30.0)];
        assert_eq!(select_counter(&scored).unwrap().name, "A");
    }

    #[test]
    fn test_empty_candidates_select_none() {
        assert!(select_counter(&[]).is_none());
    }

    #[test]
    fn test_estimate_floors_at_one_slot() {
        assert_eq!(initial_estimate(0), 15);
        assert_eq!(initial_estimate(1), 15);
    }

    #[test]
    fn test_estimate_scales_with_backlog() {
        // Queue length 2 at assignment time -> 30 minutes.
        assert_eq!(initial_estimate(2), 30);
        assert_eq!(initial_estimate(5), 75);
    }
}
