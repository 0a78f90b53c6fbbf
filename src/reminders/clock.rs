use chrono::{Local, NaiveDateTime};

/// Source of the local wall-clock time used to plan reminders.
///
/// Timer expiry itself runs on tokio's clock, so tests pair a manual clock
/// with a paused runtime.
pub trait Clock: Send + Sync {
    fn now(&self) -> NaiveDateTime;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}
