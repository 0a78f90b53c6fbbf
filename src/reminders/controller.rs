use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use crate::messages::MessageProducer;
use crate::models::UserProfile;
use crate::notify::NotificationDispatch;

use super::{plan_reminders, Clock, ReminderSnapshot, ScheduledReminder};

const ENABLE_LOGS: bool = true;

use crate::{log_debug, log_info, log_warn};

struct ControllerState {
    profile: UserProfile,
    dashboard_active: bool,
    pending: Vec<ScheduledReminder>,
    /// Cancelled together with `pending`; checked again right before dispatch.
    generation: CancellationToken,
}

impl ControllerState {
    fn cancel_all(&mut self) -> usize {
        self.generation.cancel();
        let live = self.pending.iter().filter(|r| !r.is_fired()).count();
        for reminder in self.pending.drain(..) {
            reminder.cancel();
        }
        live
    }
}

/// Owns the one live set of reminder timers.
///
/// Every input change cancels all pending reminders and plans again from the
/// clock's current time, so reminders that already fired today are not
/// repeated and a stale schedule never fires.
#[derive(Clone)]
pub struct ReminderController {
    clock: Arc<dyn Clock>,
    producer: Arc<dyn MessageProducer>,
    notifier: Arc<dyn NotificationDispatch>,
    state: Arc<Mutex<ControllerState>>,
}

impl ReminderController {
    pub fn new(
        clock: Arc<dyn Clock>,
        producer: Arc<dyn MessageProducer>,
        notifier: Arc<dyn NotificationDispatch>,
        profile: UserProfile,
    ) -> Self {
        Self {
            clock,
            producer,
            notifier,
            state: Arc::new(Mutex::new(ControllerState {
                profile,
                dashboard_active: false,
                pending: Vec::new(),
                generation: CancellationToken::new(),
            })),
        }
    }

    pub async fn update_profile(&self, profile: UserProfile) -> Vec<ReminderSnapshot> {
        let mut state = self.state.lock().await;
        state.profile = profile;
        self.reschedule_locked(&mut state)
    }

    /// Reminders only run while the dashboard is the active view.
    pub async fn set_dashboard_active(&self, active: bool) -> Vec<ReminderSnapshot> {
        let mut state = self.state.lock().await;
        state.dashboard_active = active;
        self.reschedule_locked(&mut state)
    }

    pub async fn reschedule(&self) -> Vec<ReminderSnapshot> {
        let mut state = self.state.lock().await;
        self.reschedule_locked(&mut state)
    }

    /// Reminders that have not fired yet, in firing order.
    pub async fn pending(&self) -> Vec<ReminderSnapshot> {
        let state = self.state.lock().await;
        state
            .pending
            .iter()
            .filter(|r| !r.is_fired())
            .map(ScheduledReminder::snapshot)
            .collect()
    }

    pub async fn shutdown(&self) {
        let mut state = self.state.lock().await;
        let cancelled = state.cancel_all();
        state.dashboard_active = false;
        log_info!("Reminder controller stopped, cancelled {} pending reminders", cancelled);
    }

    fn reschedule_locked(&self, state: &mut ControllerState) -> Vec<ReminderSnapshot> {
        let cancelled = state.cancel_all();
        if cancelled > 0 {
            log_debug!("Cancelled {} pending reminders", cancelled);
        }

        if !state.dashboard_active {
            return Vec::new();
        }

        let now = self.clock.now();
        let plan = match plan_reminders(&state.profile, now) {
            Ok(plan) => plan,
            Err(err) => {
                log_warn!("Not scheduling reminders: {err:#}");
                return Vec::new();
            }
        };

        let generation = CancellationToken::new();
        state.generation = generation.clone();

        for fires_at in &plan.firings {
            let delay = (*fires_at - now).to_std().unwrap_or(Duration::ZERO);
            let id = Uuid::new_v4();
            let task = tokio::spawn(fire_reminder(
                id,
                delay,
                state.profile.clone(),
                self.producer.clone(),
                self.notifier.clone(),
                generation.clone(),
            ));
            state.pending.push(ScheduledReminder::new(id, *fires_at, task));
        }

        log_info!(
            "Scheduled {} of {} reminders for {} - {} (goal {} ml)",
            plan.firings.len(),
            plan.reminder_count,
            plan.window.wake.format("%H:%M"),
            plan.window.bed.format("%H:%M"),
            plan.daily_goal
        );

        state.pending.iter().map(ScheduledReminder::snapshot).collect()
    }
}

async fn fire_reminder(
    id: Uuid,
    delay: Duration,
    profile: UserProfile,
    producer: Arc<dyn MessageProducer>,
    notifier: Arc<dyn NotificationDispatch>,
    generation: CancellationToken,
) {
    tokio::select! {
        _ = generation.cancelled() => return,
        _ = tokio::time::sleep(delay) => {}
    }

    let message = producer.reminder_message(&profile).await;

    // Rescheduled while the message was being generated.
    if generation.is_cancelled() {
        log_debug!("Dropping reminder {} after cancellation", id);
        return;
    }

    log_info!("Reminder {} firing", id);
    notifier.dispatch(&message, profile.notification_sound);
}
