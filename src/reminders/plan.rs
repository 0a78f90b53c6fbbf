//! Pure reminder planning: where in today's active window the reminders land.

use anyhow::{Context, Result};
use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use serde::Serialize;

use crate::hydration::{compute_daily_goal, reminder_count};
use crate::models::UserProfile;

const CLOCK_FORMAT: &str = "%H:%M";
const CLOCK_FORMAT_SECONDS: &str = "%H:%M:%S";

/// The wake-to-bed interval for one day. `bed` is always after `wake`; a bed
/// time at or before the wake time belongs to the next calendar day.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ActiveWindow {
    pub wake: NaiveDateTime,
    pub bed: NaiveDateTime,
}

impl ActiveWindow {
    pub fn for_day(wake_up_time: &str, bed_time: &str, day: NaiveDate) -> Result<Self> {
        let wake = day.and_time(parse_clock(wake_up_time)?);
        let mut bed = day.and_time(parse_clock(bed_time)?);
        if bed <= wake {
            bed += Duration::days(1);
        }
        Ok(Self { wake, bed })
    }

    pub fn duration(&self) -> Duration {
        self.bed - self.wake
    }
}

/// Accepts `HH:MM`, and `HH:MM:SS` with the seconds dropped.
fn parse_clock(value: &str) -> Result<NaiveTime> {
    let value = value.trim();
    NaiveTime::parse_from_str(value, CLOCK_FORMAT)
        .or_else(|_| {
            NaiveTime::parse_from_str(value, CLOCK_FORMAT_SECONDS)
                .map(|time| time.with_second(0).unwrap_or(time))
        })
        .with_context(|| format!("invalid clock time '{value}', expected HH:MM"))
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ReminderPlan {
    pub window: ActiveWindow,
    pub daily_goal: u32,
    /// Reminders spread over the whole window, including already elapsed ones.
    /// Zero when the window is over.
    pub reminder_count: u32,
    pub interval_ms: f64,
    /// Firing instants strictly after the planning time, ascending.
    pub firings: Vec<NaiveDateTime>,
}

/// Plans today's remaining reminders for `profile` as seen at `now`.
///
/// Reminders are spaced `duration / (count + 1)` apart starting one interval
/// after wake, so none lands on the wake or bed boundary. Only a malformed
/// wake or bed time is an error.
pub fn plan_reminders(profile: &UserProfile, now: NaiveDateTime) -> Result<ReminderPlan> {
    let window = ActiveWindow::for_day(&profile.wake_up_time, &profile.bed_time, now.date())?;
    let daily_goal = compute_daily_goal(profile);

    let active_ms = window.duration().num_milliseconds();
    if now > window.bed || active_ms <= 0 {
        return Ok(ReminderPlan {
            window,
            daily_goal,
            reminder_count: 0,
            interval_ms: 0.0,
            firings: Vec::new(),
        });
    }

    let count = reminder_count(daily_goal);
    let interval_ms = active_ms as f64 / f64::from(count + 1);

    let firings = (1..=count)
        .map(|i| window.wake + Duration::milliseconds((f64::from(i) * interval_ms) as i64))
        .filter(|at| *at > now)
        .collect();

    Ok(ReminderPlan {
        window,
        daily_goal,
        reminder_count: count,
        interval_ms,
        firings,
    })
}
