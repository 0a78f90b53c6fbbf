use crate::models::NotificationSound;

use super::tone::{ToneSpec, Waveform};

/// Feedback sounds played by the app itself rather than by a reminder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppSound {
    AddWater,
    GoalReached,
    Tap,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundCue {
    Notification(NotificationSound),
    App(AppSound),
}

impl From<NotificationSound> for SoundCue {
    fn from(sound: NotificationSound) -> Self {
        SoundCue::Notification(sound)
    }
}

impl From<AppSound> for SoundCue {
    fn from(sound: AppSound) -> Self {
        SoundCue::App(sound)
    }
}

impl SoundCue {
    pub fn tones(&self) -> Vec<ToneSpec> {
        use Waveform::*;

        match self {
            // soft high "drop"
            SoundCue::Notification(NotificationSound::Drop) => vec![
                ToneSpec::new(1200.0, 200, Sine),
                ToneSpec::new(1000.0, 300, Sine).after_ms(50),
            ],
            SoundCue::Notification(NotificationSound::Chime) => vec![
                ToneSpec::new(1500.0, 500, Triangle),
                ToneSpec::new(2000.0, 500, Triangle).after_ms(100),
            ],
            SoundCue::Notification(NotificationSound::Default) => {
                vec![ToneSpec::new(880.0, 200, Square)]
            }
            SoundCue::App(AppSound::AddWater) => vec![ToneSpec::new(400.0, 150, Sine)],
            // C5, E5, G5
            SoundCue::App(AppSound::GoalReached) => vec![
                ToneSpec::new(523.0, 100, Sine),
                ToneSpec::new(659.0, 100, Sine).after_ms(120),
                ToneSpec::new(784.0, 200, Sine).after_ms(240),
            ],
            SoundCue::App(AppSound::Tap) => vec![ToneSpec::new(200.0, 50, Sine)],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn cue_length(cue: SoundCue) -> Duration {
        cue.tones()
            .iter()
            .map(|t| t.offset + t.duration)
            .max()
            .unwrap()
    }

    #[test]
    fn test_cue_lengths() {
        assert_eq!(cue_length(NotificationSound::Drop.into()), Duration::from_millis(350));
        assert_eq!(cue_length(NotificationSound::Chime.into()), Duration::from_millis(600));
        assert_eq!(cue_length(NotificationSound::Default.into()), Duration::from_millis(200));
        assert_eq!(cue_length(AppSound::GoalReached.into()), Duration::from_millis(440));
        assert_eq!(cue_length(AppSound::Tap.into()), Duration::from_millis(50));
    }

    #[test]
    fn test_chime_uses_triangle_wave() {
        let tones = SoundCue::from(NotificationSound::Chime).tones();
        assert!(tones.iter().all(|t| t.waveform == Waveform::Triangle));
    }
}
