mod app;
pub mod audio;
pub mod hydration;
pub mod messages;
pub mod models;
pub mod notify;
pub mod onboarding;
pub mod picker;
pub mod reminders;
pub mod settings;
mod utils;

use std::sync::Arc;

use anyhow::Result;
use log::{info, warn};

pub use app::HydrationApp;
pub use hydration::compute_daily_goal;
pub use reminders::{plan_reminders, ReminderController};

use audio::AudioEngineHandle;
use messages::GeminiMessageProducer;
use notify::ConsoleSurface;
use reminders::SystemClock;
use settings::SettingsStore;

const SETTINGS_ENV: &str = "HYDRATEMIND_SETTINGS";
const DEFAULT_SETTINGS_PATH: &str = "settings.json";

pub fn run() -> Result<()> {
    // Initialize logging (reads RUST_LOG env var)
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    info!("HydrateMind starting up...");

    let settings_path =
        std::env::var(SETTINGS_ENV).unwrap_or_else(|_| DEFAULT_SETTINGS_PATH.to_string());
    let settings = SettingsStore::load(&settings_path)?;
    let snapshot = settings.snapshot()?;

    if !snapshot.onboarding_complete {
        warn!(
            "Onboarding not finished in {}; set \"onboardingComplete\": true to enable reminders",
            settings_path
        );
        return Ok(());
    }

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async move {
        let audio = Arc::new(AudioEngineHandle::new());
        let app = HydrationApp::new(
            settings,
            Arc::new(SystemClock),
            Arc::new(GeminiMessageProducer::from_settings(&snapshot.messages)),
            Arc::new(ConsoleSurface),
            audio.clone(),
        )?;

        info!("Daily goal: {} ml", app.daily_goal()?);
        for reminder in app.start().await? {
            info!("Reminder at {}", reminder.fires_at.format("%Y-%m-%d %H:%M"));
        }

        tokio::signal::ctrl_c().await?;
        info!("Shutting down");
        app.shutdown().await;
        audio.stop()?;
        Ok::<(), anyhow::Error>(())
    })
}
