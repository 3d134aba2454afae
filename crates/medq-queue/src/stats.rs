//! Day-scoped queue statistics. Pure aggregation, no mutation; an empty day
//! yields all zeros.

use medq_core::{Priority, Token, TokenStatus};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct PriorityBreakdown {
    pub normal: usize,
    pub urgent: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct DailyStats {
    pub total_tokens: usize,
    pub waiting_tokens: usize,
    pub completed_tokens: usize,
    /// Mean of `actual_wait_minutes` over today's completed tokens.
    pub average_wait_minutes: f64,
    pub by_priority: PriorityBreakdown,
}

/// Aggregates one day's tokens into display stats.
pub fn aggregate(tokens: &[Token]) -> DailyStats {
    let mut stats = DailyStats::default();
    let mut wait_sum: u64 = 0;
    let mut wait_count: u64 = 0;

    for token in tokens {
        stats.total_tokens += 1;
        match token.status {
            TokenStatus::Waiting => stats.waiting_tokens += 1,
            TokenStatus::Completed => {
                stats.completed_tokens += 1;
                if let Some(wait) = token.actual_wait_minutes {
                    wait_sum += u64::from(wait);
                    wait_count += 1;
                }
            }
            TokenStatus::Called | TokenStatus::Cancelled => {}
        }
        match token.priority {
            Priority::Normal => stats.by_priority.normal += 1,
            Priority::Urgent => stats.by_priority.urgent += 1,
        }
    }

    if wait_count > 0 {
        stats.average_wait_minutes = wait_sum as f64 / wait_count as f64;
    }
    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use medq_core::{CounterId, PatientId, TokenId};
    use time::macros::datetime;

    fn token(status: TokenStatus, priority: Priority, actual_wait: Option<u32>) -> Token {
        Token {
            id: TokenId::new(),
            number: 1,
            patient_id: PatientId::new(),
            counter_id: CounterId::new(),
            priority,
            status,
            estimated_wait_minutes: 15,
            actual_wait_minutes: actual_wait,
            created_at: datetime!(2024-03-10 09:00:00 UTC),
            called_at: None,
            completed_at: None,
        }
    }

    #[test]
    fn test_empty_day_yields_zeros() {
        let stats = aggregate(&[]);
        assert_eq!(stats, DailyStats::default());
        assert_eq!(stats.average_wait_minutes, 0.0);
    }

    #[test]
    fn test_counts_by_status_and_priority() {
        let tokens = vec![
            token(TokenStatus::Waiting, Priority::Normal, None),
            token(TokenStatus::Waiting, Priority::Urgent, None),
            token(TokenStatus::Called, Priority::Normal, Some(5)),
            token(TokenStatus::Completed, Priority::Normal, Some(10)),
            token(TokenStatus::Completed, Priority::Urgent, Some(20)),
            token(TokenStatus::Cancelled, Priority::Normal, None),
        ];
        let stats = aggregate(&tokens);
        assert_eq!(stats.total_tokens, 6);
        assert_eq!(stats.waiting_tokens, 2);
        assert_eq!(stats.completed_tokens, 2);
        assert_eq!(stats.average_wait_minutes, 15.0);
        assert_eq!(stats.by_priority.normal, 4);
        assert_eq!(stats.by_priority.urgent, 2);
    }

    #[test]
    fn test_average_ignores_non_completed_waits() {
        let tokens = vec![
            token(TokenStatus::Called, Priority::Normal, Some(100)),
            token(TokenStatus::Completed, Priority::Normal, Some(10)),
        ];
        assert_eq!(aggregate(&tokens).average_wait_minutes, 10.0);
    }

    #[test]
    fn test_stats_json_shape() {
        let stats = aggregate(&[token(TokenStatus::Completed, Priority::Normal, Some(12))]);
        let value = serde_json::to_value(stats).unwrap();
        assert_eq!(value["totalTokens"], 1);
        assert_eq!(value["completedTokens"], 1);
        assert_eq!(value["averageWaitMinutes"], 12.0);
        assert_eq!(value["byPriority"]["normal"], 1);
    }
}
