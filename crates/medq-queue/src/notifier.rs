//! Rank computation for the position notifier.
//!
//! Only Waiting tokens are ranked; a Called token is already being served
//! and drops out of the ranking. Ranks are 1-indexed in authoritative queue
//! order (priority desc, arrival asc), and only the fixed milestones get a
//! notification. Deliberate volume reduction: not every position change
//! notifies, and repeated passes over an unchanged queue repeat the same
//! notifications (no dedup).

use medq_core::{Token, TokenStatus};

/// Ranks that receive a push notification.
pub const NOTIFY_RANKS: [u32; 4] = [1, 2, 3, 5];

/// The rank that additionally receives an SMS, on top of the push.
pub const SMS_RANK: u32 = 3;

/// Whether a waiting token at `rank` gets a push notification this pass.
pub fn should_notify(rank: u32) -> bool {
    NOTIFY_RANKS.contains(&rank)
}

/// Orders the Waiting tokens of one counter and pairs each with its
/// 1-indexed rank.
pub fn waiting_ranks(counter_tokens: &[Token]) -> Vec<(u32, Token)> {
    let mut waiting: Vec<Token> = counter_tokens
        .iter()
        .filter(|t| t.status == TokenStatus::Waiting)
        .cloned()
        .collect();
    waiting.sort_by_key(Token::queue_key);
    waiting
        .into_iter()
        .enumerate()
        .map(|(index, token)| (index as u32 + 1, token))
        .collect()
}
