use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
    sync::RwLock,
};

use crate::models::UserProfile;

/// Whether the host lets us show user-visible notifications.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub enum NotificationPermission {
    /// Not asked yet.
    #[default]
    Default,
    Granted,
    Denied,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct MessageSettings {
    pub model: String,
    pub api_base: String,
    /// Environment variables checked in order for the API key.
    pub api_key_env: Vec<String>,
}

impl Default for MessageSettings {
    fn default() -> Self {
        Self {
            model: "gemini-2.5-flash".into(),
            api_base: "https://generativelanguage.googleapis.com/v1beta".into(),
            api_key_env: vec!["GEMINI_API_KEY".into(), "API_KEY".into()],
        }
    }
}

impl MessageSettings {
    pub fn resolve_api_key(&self) -> Option<String> {
        self.api_key_env
            .iter()
            .filter_map(|key| std::env::var(key).ok())
            .find(|value| !value.trim().is_empty())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct AppSettings {
    pub profile: UserProfile,
    /// Skip the onboarding wizard and open the dashboard directly.
    pub onboarding_complete: bool,
    pub notification_permission: NotificationPermission,
    pub messages: MessageSettings,
    /// Gain for reminder and feedback cues, `0.0..=1.0`.
    pub cue_volume: f32,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            profile: UserProfile::default(),
            onboarding_complete: false,
            notification_permission: NotificationPermission::default(),
            messages: MessageSettings::default(),
            cue_volume: 1.0,
        }
    }
}

/// Settings loaded once from disk and edited in memory afterwards.
pub struct SettingsStore {
    path: Option<PathBuf>,
    data: RwLock<AppSettings>,
}

impl SettingsStore {
    /// Reads `path` if it exists, otherwise starts from defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let data = if path.exists() {
            let contents = fs::read_to_string(path)
                .with_context(|| format!("Failed to read settings from {}", path.display()))?;
            serde_json::from_str(&contents)
                .with_context(|| format!("Invalid settings file {}", path.display()))?
        } else {
            AppSettings::default()
        };

        Ok(Self {
            path: Some(path.to_path_buf()),
            data: RwLock::new(data),
        })
    }

    pub fn in_memory(settings: AppSettings) -> Self {
        Self {
            path: None,
            data: RwLock::new(settings),
        }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn snapshot(&self) -> Result<AppSettings> {
        self.data
            .read()
            .map(|guard| guard.clone())
            .map_err(|_| anyhow!("settings lock poisoned"))
    }

    pub fn profile(&self) -> Result<UserProfile> {
        Ok(self.snapshot()?.profile)
    }

    pub fn update_profile(&self, profile: UserProfile) -> Result<()> {
        self.update(|settings| settings.profile = profile)
    }

    pub fn set_notification_permission(&self, permission: NotificationPermission) -> Result<()> {
        self.update(|settings| settings.notification_permission = permission)
    }

    pub fn set_onboarding_complete(&self, complete: bool) -> Result<()> {
        self.update(|settings| settings.onboarding_complete = complete)
    }

    fn update(&self, apply: impl FnOnce(&mut AppSettings)) -> Result<()> {
        let mut guard = self
            .data
            .write()
            .map_err(|_| anyhow!("settings lock poisoned"))?;
        apply(&mut *guard);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::UserCategory;

    #[test]
    fn test_missing_file_uses_defaults() {
        let path = std::env::temp_dir().join("hydratemind-missing-settings.json");
        let _ = fs::remove_file(&path);

        let store = SettingsStore::load(&path).unwrap();
        let settings = store.snapshot().unwrap();
        assert_eq!(settings, AppSettings::default());
        assert_eq!(store.path(), Some(path.as_path()));
    }

    #[test]
    fn test_loads_camel_case_file() {
        let path = std::env::temp_dir().join(format!(
            "hydratemind-settings-{}.json",
            uuid::Uuid::new_v4()
        ));
        fs::write(
            &path,
            r#"{
                "profile": {"category": "athlete", "weight": 64, "wakeUpTime": "07:15"},
                "onboardingComplete": true,
                "notificationPermission": "granted",
                "messages": {"model": "gemini-2.0-flash"}
            }"#,
        )
        .unwrap();

        let store = SettingsStore::load(&path).unwrap();
        let settings = store.snapshot().unwrap();
        fs::remove_file(&path).unwrap();

        assert_eq!(settings.profile.category, Some(UserCategory::Athlete));
        assert_eq!(settings.profile.wake_up_time, "07:15");
        assert_eq!(settings.profile.bed_time, "23:00");
        assert!(settings.onboarding_complete);
        assert_eq!(settings.notification_permission, NotificationPermission::Granted);
        assert_eq!(settings.messages.model, "gemini-2.0-flash");
        assert_eq!(settings.messages.api_key_env, MessageSettings::default().api_key_env);
        assert_eq!(settings.cue_volume, 1.0);
    }

    #[test]
    fn test_reads_cue_volume() {
        let settings: AppSettings = serde_json::from_str(r#"{"cueVolume": 0.25}"#).unwrap();
        assert_eq!(settings.cue_volume, 0.25);
        assert!(!settings.onboarding_complete);
    }

    #[test]
    fn test_invalid_file_is_an_error() {
        let path = std::env::temp_dir().join(format!(
            "hydratemind-bad-settings-{}.json",
            uuid::Uuid::new_v4()
        ));
        fs::write(&path, "{ not json").unwrap();
        let result = SettingsStore::load(&path);
        fs::remove_file(&path).unwrap();
        assert!(result.is_err());
    }

    #[test]
    fn test_updates_stay_in_memory() {
        let store = SettingsStore::in_memory(AppSettings::default());
        let mut profile = store.profile().unwrap();
        profile.weight = 90.0;
        store.update_profile(profile).unwrap();
        store
            .set_notification_permission(NotificationPermission::Denied)
            .unwrap();

        let settings = store.snapshot().unwrap();
        assert_eq!(settings.profile.weight, 90.0);
        assert_eq!(settings.notification_permission, NotificationPermission::Denied);
        assert!(store.path().is_none());
    }

    #[test]
    fn test_api_key_resolution_skips_blank_values() {
        let settings = MessageSettings {
            api_key_env: vec![
                "HYDRATEMIND_TEST_BLANK_KEY".into(),
                "HYDRATEMIND_TEST_REAL_KEY".into(),
            ],
            ..MessageSettings::default()
        };
        std::env::set_var("HYDRATEMIND_TEST_BLANK_KEY", "  ");
        std::env::set_var("HYDRATEMIND_TEST_REAL_KEY", "secret");
        assert_eq!(settings.resolve_api_key().as_deref(), Some("secret"));
    }
}
