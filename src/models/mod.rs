pub mod hydration_log;
pub mod profile;

pub use hydration_log::{CalendarDay, HydrationLog, HydrationLogEntry, WeeklySummary};
pub use profile::{NotificationSound, UrineColor, UserCategory, UserProfile, WaterHabit};
