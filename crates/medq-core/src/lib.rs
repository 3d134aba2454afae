pub mod counter;
pub mod error;
pub mod id;
pub mod patient;
pub mod time;
pub mod token;

pub use counter::{Counter, CounterStatus};
pub use error::{CoreError, ErrorCategory, Result};
pub use id::{CategoryId, CounterId, PatientId, TokenId};
pub use patient::{Patient, PushSubscription};
pub use time::{Clock, ManualClock, SystemClock, elapsed_whole_minutes, local_day, now_utc};
pub use token::{Priority, Token, TokenStatus};
