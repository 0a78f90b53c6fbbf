pub mod goal;
pub mod intake;

pub use goal::{compute_daily_goal, reminder_count};
pub use intake::{progress_percent, IntakeTracker, IntakeUpdate, GLASS_ML};
