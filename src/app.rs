use std::sync::Arc;

use anyhow::{anyhow, Result};
use chrono::NaiveDate;
use tokio::sync::Mutex;

use crate::{
    audio::{AppSound, CuePlayer, SoundCue},
    hydration::{compute_daily_goal, progress_percent, IntakeTracker, IntakeUpdate, GLASS_ML},
    messages::MessageProducer,
    models::{
        CalendarDay, HydrationLog, NotificationSound, UrineColor, UserCategory, UserProfile, WaterHabit,
        WeeklySummary,
    },
    notify::{NotificationSurface, Notifier},
    onboarding::{Onboarding, OnboardingStep},
    picker::{MetricDial, MetricKind},
    reminders::{Clock, ReminderController, ReminderSnapshot},
    settings::SettingsStore,
};

const ENABLE_LOGS: bool = true;

use crate::{log_info, log_warn};

struct AppInner {
    onboarding: Onboarding,
    intake: IntakeTracker,
    intake_date: NaiveDate,
    log: HydrationLog,
}

/// Ties the profile, onboarding wizard, intake tracking and reminder
/// scheduling together. Every profile edit and every dashboard transition
/// reschedules reminders.
pub struct HydrationApp {
    settings: SettingsStore,
    clock: Arc<dyn Clock>,
    audio: Arc<dyn CuePlayer>,
    notifier: Arc<Notifier>,
    reminders: ReminderController,
    inner: Mutex<AppInner>,
    /// Serializes profile read-modify-write so the store and the reminder
    /// controller always hold the same profile.
    profile_edit: Mutex<()>,
}

impl HydrationApp {
    pub fn new(
        settings: SettingsStore,
        clock: Arc<dyn Clock>,
        producer: Arc<dyn MessageProducer>,
        surface: Arc<dyn NotificationSurface>,
        audio: Arc<dyn CuePlayer>,
    ) -> Result<Self> {
        let snapshot = settings.snapshot()?;
        if let Err(err) = audio.set_volume(snapshot.cue_volume.clamp(0.0, 1.0)) {
            log_warn!("Could not set cue volume: {err}");
        }
        let notifier = Arc::new(Notifier::new(
            snapshot.notification_permission,
            surface,
            audio.clone(),
        ));
        let reminders = ReminderController::new(
            clock.clone(),
            producer,
            notifier.clone(),
            snapshot.profile,
        );
        let onboarding = if snapshot.onboarding_complete {
            Onboarding::completed()
        } else {
            Onboarding::new()
        };

        Ok(Self {
            inner: Mutex::new(AppInner {
                onboarding,
                intake: IntakeTracker::new(),
                intake_date: clock.now().date(),
                log: HydrationLog::new(),
            }),
            profile_edit: Mutex::new(()),
            settings,
            clock,
            audio,
            notifier,
            reminders,
        })
    }

    /// Activates reminders when onboarding was already finished.
    pub async fn start(&self) -> Result<Vec<ReminderSnapshot>> {
        let on_dashboard = self.inner.lock().await.onboarding.is_dashboard();
        if on_dashboard {
            return self.enter_dashboard().await;
        }
        Ok(Vec::new())
    }

    pub async fn shutdown(&self) {
        self.reminders.shutdown().await;
    }

    pub fn profile(&self) -> Result<UserProfile> {
        self.settings.profile()
    }

    pub async fn step(&self) -> OnboardingStep {
        self.inner.lock().await.onboarding.step()
    }

    pub async fn next_step(&self) -> Result<OnboardingStep> {
        let profile = self.profile()?;
        let step = self.inner.lock().await.onboarding.next(&profile)?;
        if step == OnboardingStep::Dashboard {
            self.enter_dashboard().await?;
        }
        Ok(step)
    }

    pub async fn back_step(&self) -> OnboardingStep {
        self.inner.lock().await.onboarding.back()
    }

    async fn enter_dashboard(&self) -> Result<Vec<ReminderSnapshot>> {
        let permission = self.notifier.request_permission();
        self.settings.set_notification_permission(permission)?;
        self.settings.set_onboarding_complete(true)?;
        Ok(self.reminders.set_dashboard_active(true).await)
    }

    /// Applies `edit` to the profile and reschedules reminders.
    pub async fn edit_profile(
        &self,
        edit: impl FnOnce(&mut UserProfile),
    ) -> Result<Vec<ReminderSnapshot>> {
        let _edit = self.profile_edit.lock().await;
        let mut profile = self.profile()?;
        edit(&mut profile);
        self.settings.update_profile(profile.clone())?;
        Ok(self.reminders.update_profile(profile).await)
    }

    pub async fn select_category(&self, category: UserCategory) -> Result<Vec<ReminderSnapshot>> {
        self.edit_profile(|p| p.category = Some(category)).await
    }

    pub async fn select_habit(&self, habit: WaterHabit) -> Result<Vec<ReminderSnapshot>> {
        let scheduled = self.edit_profile(|p| p.habit = Some(habit)).await?;
        self.play(AppSound::Tap);
        Ok(scheduled)
    }

    pub async fn set_urine_color(&self, color: UrineColor) -> Result<Vec<ReminderSnapshot>> {
        self.edit_profile(|p| p.last_urine_color = Some(color)).await
    }

    /// Sets a body metric, clamped to the metric's dial range.
    pub async fn set_metric(&self, kind: MetricKind, value: i32) -> Result<Vec<ReminderSnapshot>> {
        let scale = kind.scale();
        let value = f64::from(value.clamp(scale.min, scale.max));
        self.edit_profile(|p| match kind {
            MetricKind::Weight => p.weight = value,
            MetricKind::Height => p.height = value,
        })
        .await
    }

    /// Switches the onboarding dial to `kind`.
    pub fn select_metric(
        &self,
        kind: MetricKind,
        center: (f64, f64),
        radius: f64,
    ) -> Result<MetricDial> {
        let profile = self.profile()?;
        let value = match kind {
            MetricKind::Weight => profile.weight,
            MetricKind::Height => profile.height,
        }
        .round() as i32;
        self.play(AppSound::Tap);
        Ok(kind.dial(value, center, radius))
    }

    /// Feeds a drag position on the metric dial. Returns the new value, or
    /// `None` when the move was rejected.
    pub async fn drag_metric(
        &self,
        kind: MetricKind,
        pointer: (f64, f64),
        center: (f64, f64),
    ) -> Result<Option<i32>> {
        let profile = self.profile()?;
        let current = match kind {
            MetricKind::Weight => profile.weight,
            MetricKind::Height => profile.height,
        }
        .round() as i32;

        let Some(value) = kind.scale().value_for_pointer(current, pointer, center) else {
            return Ok(None);
        };
        if value != current {
            self.set_metric(kind, value).await?;
        }
        Ok(Some(value))
    }

    /// Settings screen: active window and reminder sound.
    pub async fn update_schedule(
        &self,
        wake_up_time: &str,
        bed_time: &str,
        sound: NotificationSound,
    ) -> Result<Vec<ReminderSnapshot>> {
        let scheduled = self
            .edit_profile(|p| {
                p.wake_up_time = wake_up_time.to_string();
                p.bed_time = bed_time.to_string();
                p.notification_sound = sound;
            })
            .await?;
        self.play(AppSound::Tap);
        Ok(scheduled)
    }

    pub fn daily_goal(&self) -> Result<u32> {
        Ok(compute_daily_goal(&self.profile()?))
    }

    pub async fn add_glass(&self) -> Result<IntakeUpdate> {
        self.add_water(GLASS_ML).await
    }

    pub async fn add_water(&self, amount: u32) -> Result<IntakeUpdate> {
        let goal = self.daily_goal()?;
        let today = self.clock.now().date();

        let update = {
            let mut inner = self.inner.lock().await;
            if inner.intake_date != today {
                inner.intake.reset();
                inner.intake_date = today;
            }
            let update = inner.intake.add(amount, goal);
            inner.log.record(today, update.total, goal);
            update
        };

        if update.goal_reached {
            log_info!("Daily goal of {} ml reached", goal);
        }
        self.play(if update.goal_reached {
            AppSound::GoalReached
        } else {
            AppSound::AddWater
        });
        Ok(update)
    }

    pub async fn intake(&self) -> u32 {
        let today = self.clock.now().date();
        let inner = self.inner.lock().await;
        if inner.intake_date == today {
            inner.intake.total()
        } else {
            0
        }
    }

    pub async fn progress_percent(&self) -> Result<f64> {
        let goal = self.daily_goal()?;
        Ok(progress_percent(self.intake().await, goal))
    }

    pub async fn hydration_log(&self) -> HydrationLog {
        self.inner.lock().await.log.clone()
    }

    pub async fn weekly_summary(&self, date: NaiveDate) -> WeeklySummary {
        self.inner.lock().await.log.weekly_summary(date)
    }

    /// Turns the history calendar to `year`/`month`.
    pub async fn show_calendar_month(
        &self,
        year: i32,
        month: u32,
    ) -> Result<Vec<Option<CalendarDay>>> {
        let today = self.clock.now().date();
        let cells = self
            .inner
            .lock()
            .await
            .log
            .calendar_month(year, month, today)
            .ok_or_else(|| anyhow!("invalid calendar month {year}-{month}"))?;
        self.play(AppSound::Tap);
        Ok(cells)
    }

    pub async fn pending_reminders(&self) -> Vec<ReminderSnapshot> {
        self.reminders.pending().await
    }

    fn play(&self, sound: AppSound) {
        if let Err(err) = self.audio.play_cue(SoundCue::App(sound)) {
            log_warn!("Could not play {:?}: {err}", sound);
        }
    }
}
