//! Queue routing core for the MedQ service.
//!
//! An arrival enters [`QueueService::route_arrival`]: the estimator scores
//! every active counter of the requested category, the router picks the
//! least-loaded one and issues the next facility-wide daily token number,
//! and the token starts life Waiting. Staff actions drive the token state
//! machine (Waiting -> Called -> Completed, with Cancelled reachable from
//! both non-terminal states); every change to a counter's waiting set
//! triggers a best-effort rank-milestone notification pass.

pub mod error;
pub mod estimator;
pub mod notifier;
pub mod router;
pub mod service;
pub mod state;
pub mod stats;

pub use error::{QueueError, QueueErrorKind, Result};
pub use service::QueueService;
pub use stats::{DailyStats, PriorityBreakdown};
