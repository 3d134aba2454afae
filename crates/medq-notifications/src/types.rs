use serde::{Deserialize, Serialize};

/// What a notification is about. Carried on the wire so display clients can
/// style their alerts without parsing the body text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    /// Acknowledgment right after a token is issued.
    TokenCreated,
    /// Rank-milestone update ("you are N away").
    PositionUpdate,
    /// The token has been called to its counter.
    YourTurn,
    /// Service finished.
    Completed,
}

/// A rendered patient-facing notification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub kind: NotificationKind,
    pub title: String,
    pub body: String,
    /// The token's facility-wide daily number, for display.
    pub token_number: u32,
}

impl Notification {
    pub fn token_created(token_number: u32, estimated_wait_minutes: u32) -> Self {
        Self {
            kind: NotificationKind::TokenCreated,
            title: format!("Token #{token_number} issued"),
            body: format!(
                "Your token number is {token_number}. Estimated wait: {estimated_wait_minutes} minutes."
            ),
            token_number,
        }
    }

    pub fn position_update(token_number: u32, rank: u32) -> Self {
        let body = if rank == 1 {
            "You are next in line. Please stay close to your counter.".to_string()
        } else {
            format!("You are {rank} places away from being called.")
        };
        Self {
            kind: NotificationKind::PositionUpdate,
            title: format!("Token #{token_number} queue update"),
            body,
            token_number,
        }
    }

    pub fn your_turn(token_number: u32, counter_name: &str) -> Self {
        Self {
            kind: NotificationKind::YourTurn,
            title: format!("Token #{token_number}: it's your turn"),
            body: format!("Please proceed to {counter_name}."),
            token_number,
        }
    }

    pub fn completed(token_number: u32) -> Self {
        Self {
            kind: NotificationKind::Completed,
            title: format!("Token #{token_number} completed"),
            body: "Thank you for your visit.".to_string(),
            token_number,
        }
    }

    /// Single-line rendering for SMS delivery.
    pub fn as_sms_text(&self) -> String {
        format!("{}: {}", self.title, self.body)
    }
}
