//! Best-effort reminder delivery: a visible notification when the host allows
//! it, and an audible cue in every case.

use std::sync::{Arc, RwLock};

use anyhow::Result;

use crate::audio::{CuePlayer, SoundCue};
use crate::models::NotificationSound;
use crate::settings::NotificationPermission;

const ENABLE_LOGS: bool = true;

use crate::{log_info, log_warn};

pub const NOTIFICATION_TITLE: &str = "HydrateMind";

pub trait NotificationDispatch: Send + Sync {
    /// Never fails; delivery problems are logged.
    fn dispatch(&self, message: &str, sound: NotificationSound);
}

/// Where visible notifications are shown.
pub trait NotificationSurface: Send + Sync {
    /// Asks the host for permission to show notifications.
    fn request_permission(&self) -> NotificationPermission;

    fn show(&self, title: &str, body: &str) -> Result<()>;
}

/// Prints notifications to stdout. Terminals need no permission.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleSurface;

impl NotificationSurface for ConsoleSurface {
    fn request_permission(&self) -> NotificationPermission {
        NotificationPermission::Granted
    }

    fn show(&self, title: &str, body: &str) -> Result<()> {
        println!("💧 {title}: {body}");
        Ok(())
    }
}

pub struct Notifier {
    permission: RwLock<NotificationPermission>,
    surface: Arc<dyn NotificationSurface>,
    audio: Arc<dyn CuePlayer>,
}

impl Notifier {
    pub fn new(
        permission: NotificationPermission,
        surface: Arc<dyn NotificationSurface>,
        audio: Arc<dyn CuePlayer>,
    ) -> Self {
        Self {
            permission: RwLock::new(permission),
            surface,
            audio,
        }
    }

    pub fn permission(&self) -> NotificationPermission {
        self.permission
            .read()
            .map(|guard| *guard)
            .unwrap_or(NotificationPermission::Denied)
    }

    /// Asks the surface once; an earlier grant or denial is kept.
    pub fn request_permission(&self) -> NotificationPermission {
        let current = self.permission();
        if current != NotificationPermission::Default {
            return current;
        }

        let answer = self.surface.request_permission();
        if let Ok(mut guard) = self.permission.write() {
            *guard = answer;
        }
        log_info!("Notification permission: {:?}", answer);
        answer
    }

    fn play(&self, sound: NotificationSound) {
        if let Err(err) = self.audio.play_cue(SoundCue::Notification(sound)) {
            log_warn!("Could not play notification sound {:?}: {err}", sound);
        }
    }
}

impl NotificationDispatch for Notifier {
    fn dispatch(&self, message: &str, sound: NotificationSound) {
        if self.permission() == NotificationPermission::Granted {
            if let Err(err) = self.surface.show(NOTIFICATION_TITLE, message) {
                log_warn!("Failed to show notification: {err}");
            }
        } else {
            log_warn!("Notification permission not granted. Message: {message}");
        }
        self.play(sound);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::RecordingCuePlayer;
    use anyhow::anyhow;
    use std::sync::Mutex;

    struct FakeSurface {
        answer: NotificationPermission,
        fail: bool,
        shown: Mutex<Vec<(String, String)>>,
    }

    impl FakeSurface {
        fn new(answer: NotificationPermission, fail: bool) -> Self {
            Self {
                answer,
                fail,
                shown: Mutex::new(Vec::new()),
            }
        }
    }

    impl NotificationSurface for FakeSurface {
        fn request_permission(&self) -> NotificationPermission {
            self.answer
        }

        fn show(&self, title: &str, body: &str) -> Result<()> {
            if self.fail {
                return Err(anyhow!("surface unavailable"));
            }
            self.shown
                .lock()
                .unwrap()
                .push((title.to_string(), body.to_string()));
            Ok(())
        }
    }

    #[test]
    fn test_granted_shows_and_plays() {
        let surface = Arc::new(FakeSurface::new(NotificationPermission::Granted, false));
        let audio = Arc::new(RecordingCuePlayer::default());
        let notifier = Notifier::new(NotificationPermission::Granted, surface.clone(), audio.clone());

        notifier.dispatch("Bir yudum al.", NotificationSound::Chime);

        assert_eq!(
            *surface.shown.lock().unwrap(),
            vec![("HydrateMind".to_string(), "Bir yudum al.".to_string())]
        );
        assert_eq!(audio.played(), vec![SoundCue::Notification(NotificationSound::Chime)]);
    }

    #[test]
    fn test_without_permission_still_plays_sound() {
        let surface = Arc::new(FakeSurface::new(NotificationPermission::Denied, false));
        let audio = Arc::new(RecordingCuePlayer::default());
        let notifier = Notifier::new(NotificationPermission::Denied, surface.clone(), audio.clone());

        notifier.dispatch("Bir yudum al.", NotificationSound::Drop);

        assert!(surface.shown.lock().unwrap().is_empty());
        assert_eq!(audio.played(), vec![SoundCue::Notification(NotificationSound::Drop)]);
    }

    #[test]
    fn test_surface_failure_still_plays_sound() {
        let surface = Arc::new(FakeSurface::new(NotificationPermission::Granted, true));
        let audio = Arc::new(RecordingCuePlayer::default());
        let notifier = Notifier::new(NotificationPermission::Granted, surface, audio.clone());

        notifier.dispatch("x", NotificationSound::Default);
        assert_eq!(audio.played().len(), 1);
    }

    #[test]
    fn test_request_permission_only_asks_when_undecided() {
        let surface = Arc::new(FakeSurface::new(NotificationPermission::Granted, false));
        let audio = Arc::new(RecordingCuePlayer::default());

        let undecided = Notifier::new(NotificationPermission::Default, surface.clone(), audio.clone());
        assert_eq!(undecided.request_permission(), NotificationPermission::Granted);
        assert_eq!(undecided.permission(), NotificationPermission::Granted);

        let denied = Notifier::new(NotificationPermission::Denied, surface, audio);
        assert_eq!(denied.request_permission(), NotificationPermission::Denied);
    }
}
