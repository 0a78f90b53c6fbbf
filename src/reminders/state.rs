use chrono::NaiveDateTime;
use serde::Serialize;
use tokio::task::JoinHandle;
use uuid::Uuid;

/// A reminder waiting on its timer task. Dropping it does not cancel the
/// task; the owner calls [`ScheduledReminder::cancel`].
#[derive(Debug)]
pub struct ScheduledReminder {
    pub id: Uuid,
    pub fires_at: NaiveDateTime,
    task: JoinHandle<()>,
}

impl ScheduledReminder {
    pub fn new(id: Uuid, fires_at: NaiveDateTime, task: JoinHandle<()>) -> Self {
        Self { id, fires_at, task }
    }

    pub fn is_fired(&self) -> bool {
        self.task.is_finished()
    }

    pub fn cancel(&self) {
        self.task.abort();
    }

    pub fn snapshot(&self) -> ReminderSnapshot {
        ReminderSnapshot {
            id: self.id,
            fires_at: self.fires_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ReminderSnapshot {
    pub id: Uuid,
    pub fires_at: NaiveDateTime,
}
