use std::sync::Mutex;
use time::{Date, Duration, OffsetDateTime, UtcOffset};

/// Current instant in UTC.
pub fn now_utc() -> OffsetDateTime {
    OffsetDateTime::now_utc()
}

/// The facility-local calendar day containing `instant`.
///
/// Token numbering, estimator inputs, and daily stats are all scoped to this
/// day; `offset` is the facility's UTC offset so midnight falls on the local
/// boundary rather than the UTC one.
pub fn local_day(instant: OffsetDateTime, offset: UtcOffset) -> Date {
    instant.to_offset(offset).date()
}

/// Whole elapsed minutes between two instants, floored.
///
/// Returns 0 when `to` precedes `from` (clock skew between store timestamps
/// must not produce negative waits).
pub fn elapsed_whole_minutes(from: OffsetDateTime, to: OffsetDateTime) -> u32 {
    let minutes = (to - from).whole_minutes();
    if minutes < 0 { 0 } else { minutes as u32 }
}

/// Source of "now" for timestamping and day-scope decisions.
///
/// Production code uses [`SystemClock`]; tests use [`ManualClock`] to pin
/// transition timestamps.
pub trait Clock: Send + Sync {
    fn now(&self) -> OffsetDateTime;
}

/// Wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> OffsetDateTime {
        OffsetDateTime::now_utc()
    }
}

/// A clock pinned to an explicit instant, advanced by hand.
#[derive(Debug)]
pub struct ManualClock {
    now: Mutex<OffsetDateTime>,
}

impl ManualClock {
    pub fn new(start: OffsetDateTime) -> Self {
        Self {
            now: Mutex::new(start),
        }
    }

    pub fn advance(&self, by: Duration) {
        let mut guard = self.now.lock().expect("clock lock poisoned");
        *guard += by;
    }

    pub fn set(&self, instant: OffsetDateTime) {
        let mut guard = self.now.lock().expect("clock lock poisoned");
        *guard = instant;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> OffsetDateTime {
        *self.now.lock().expect("clock lock poisoned")
    }
}
