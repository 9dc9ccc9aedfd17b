use std::sync::atomic::{AtomicI64, Ordering};

use chrono::{DateTime, Utc};

/// Source of the current time for record ids and dates.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Always reports the same instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Hands out record ids: creation time in milliseconds, bumped past the
/// previous id when two records land in the same millisecond.
#[derive(Debug, Default)]
pub struct IdGenerator {
    last: AtomicI64,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Never hands out an id at or below `floor`.
    pub fn starting_after(floor: i64) -> Self {
        Self {
            last: AtomicI64::new(floor),
        }
    }

    pub fn next(&self, now: DateTime<Utc>) -> String {
        let candidate = now.timestamp_millis();
        let mut last = self.last.load(Ordering::SeqCst);
        loop {
            let id = candidate.max(last.saturating_add(1));
            match self
                .last
                .compare_exchange(last, id, Ordering::SeqCst, Ordering::SeqCst)
            {
                Ok(_) => return id.to_string(),
                Err(actual) => last = actual,
            }
        }
    }
}
