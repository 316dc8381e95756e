//! Clock and record id generation

use chrono::{Local, NaiveDate, Utc};
use std::sync::atomic::{AtomicI64, Ordering};

/// Source of "today" and the millisecond timestamp used for ids
pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;
    fn now_millis(&self) -> i64;
}

/// Wall clock; "today" is the local calendar date
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }

    fn now_millis(&self) -> i64 {
        Utc::now().timestamp_millis()
    }
}

/// Clock frozen at a given date and millisecond, advanced by hand
#[derive(Debug)]
pub struct FixedClock {
    today: NaiveDate,
    millis: AtomicI64,
}

impl FixedClock {
    pub fn new(today: NaiveDate, millis: i64) -> Self {
        Self {
            today,
            millis: AtomicI64::new(millis),
        }
    }

    pub fn advance(&self, ms: i64) {
        self.millis.fetch_add(ms, Ordering::SeqCst);
    }
}

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.today
    }

    fn now_millis(&self) -> i64 {
        self.millis.load(Ordering::SeqCst)
    }
}

/// Issues `<prefix><millis>` ids that never repeat.
///
/// A request in the same (or an earlier) millisecond as the previous one gets
/// the previous value plus one.
#[derive(Clone, Debug, Default)]
pub struct IdGenerator {
    last: i64,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next(&mut self, prefix: &str, now_ms: i64) -> String {
        let value = if now_ms > self.last {
            now_ms
        } else {
            self.last + 1
        };
        self.last = value;
        format!("{}{}", prefix, value)
    }
}
