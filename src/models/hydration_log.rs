//! Per-day intake history backing the calendar view.

use std::collections::BTreeMap;

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct HydrationLogEntry {
    /// Cumulative intake for the day, ml.
    pub intake: u32,
    /// The daily goal in effect when the entry was last written, ml.
    pub goal: u32,
}

impl HydrationLogEntry {
    pub fn goal_met(&self) -> bool {
        self.intake >= self.goal
    }
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct WeeklySummary {
    pub total_intake: u32,
    pub goal_met_days: u32,
}

/// One day cell of the history calendar.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CalendarDay {
    pub date: NaiveDate,
    /// `YYYY-MM-DD`, the same key the log serializes under.
    pub key: String,
    pub entry: Option<HydrationLogEntry>,
    pub is_today: bool,
}

/// Entries keyed by local calendar date; serializes as a `YYYY-MM-DD` map.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct HydrationLog {
    entries: BTreeMap<NaiveDate, HydrationLogEntry>,
}

impl HydrationLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, date: NaiveDate, intake: u32, goal: u32) {
        self.entries.insert(date, HydrationLogEntry { intake, goal });
    }

    pub fn entry(&self, date: NaiveDate) -> Option<HydrationLogEntry> {
        self.entries.get(&date).copied()
    }

    pub fn date_key(date: NaiveDate) -> String {
        date.format("%Y-%m-%d").to_string()
    }

    /// Totals for the Monday-to-Sunday week containing `date`.
    pub fn weekly_summary(&self, date: NaiveDate) -> WeeklySummary {
        let start = date - Duration::days(date.weekday().num_days_from_monday() as i64);

        (0..7)
            .filter_map(|offset| self.entry(start + Duration::days(offset)))
            .fold(WeeklySummary::default(), |mut summary, entry| {
                summary.total_intake = summary.total_intake.saturating_add(entry.intake);
                if entry.goal_met() {
                    summary.goal_met_days += 1;
                }
                summary
            })
    }

    /// Calendar cells for a month, Monday first. Leading `None`s pad the
    /// first week. Returns `None` for an invalid year/month.
    pub fn month_grid(year: i32, month: u32) -> Option<Vec<Option<NaiveDate>>> {
        let first = NaiveDate::from_ymd_opt(year, month, 1)?;
        let padding = first.weekday().num_days_from_monday() as usize;

        let mut cells: Vec<Option<NaiveDate>> = vec![None; padding];
        cells.extend(
            first
                .iter_days()
                .take_while(|day| day.month() == month)
                .map(Some),
        );
        Some(cells)
    }

    /// `month_grid` with each day's entry filled in.
    pub fn calendar_month(
        &self,
        year: i32,
        month: u32,
        today: NaiveDate,
    ) -> Option<Vec<Option<CalendarDay>>> {
        let cells = Self::month_grid(year, month)?;
        Some(
            cells
                .into_iter()
                .map(|cell| {
                    cell.map(|date| CalendarDay {
                        date,
                        key: Self::date_key(date),
                        entry: self.entry(date),
                        is_today: date == today,
                    })
                })
                .collect(),
        )
    }
}
