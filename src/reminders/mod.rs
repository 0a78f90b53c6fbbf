pub mod clock;
pub mod controller;
pub mod plan;
pub mod state;

pub use clock::{Clock, SystemClock};
pub use controller::ReminderController;
pub use plan::{plan_reminders, ActiveWindow, ReminderPlan};
pub use state::{ReminderSnapshot, ScheduledReminder};
