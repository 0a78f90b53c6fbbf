use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum UserCategory {
    Athlete,
    BusinessPerson,
    Student,
}

impl UserCategory {
    pub fn label(&self) -> &'static str {
        match self {
            UserCategory::Athlete => "Sporcu",
            UserCategory::BusinessPerson => "İş İnsanı",
            UserCategory::Student => "Öğrenci",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum WaterHabit {
    Low,
    Medium,
    High,
}

impl WaterHabit {
    pub fn label(&self) -> &'static str {
        match self {
            WaterHabit::Low => "Nadiren Su İçerim",
            WaterHabit::Medium => "Ara Sıra Hatırlamam Gerekir",
            WaterHabit::High => "Düzenli Su İçerim",
        }
    }
}

/// Self-reported urine color, used as a proxy for the current hydration state.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum UrineColor {
    Optimal,
    Good,
    Dehydrated,
}

impl UrineColor {
    pub fn label(&self) -> &'static str {
        match self {
            UrineColor::Optimal => "Optimal (Açık Sarı)",
            UrineColor::Good => "İyi (Saman Sarısı)",
            UrineColor::Dehydrated => "Dehidre (Koyu Sarı/Turuncu)",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub enum NotificationSound {
    Drop,
    Chime,
    #[default]
    Default,
}

impl NotificationSound {
    pub fn label(&self) -> &'static str {
        match self {
            NotificationSound::Drop => "Sakin Damla",
            NotificationSound::Chime => "Kristal Çan",
            NotificationSound::Default => "Varsayılan",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct UserProfile {
    pub category: Option<UserCategory>,
    /// Kilograms.
    pub weight: f64,
    /// Centimeters. Collected during onboarding, not used by any calculation yet.
    pub height: f64,
    pub habit: Option<WaterHabit>,
    pub last_urine_color: Option<UrineColor>,
    /// Local clock time, `HH:MM`.
    pub wake_up_time: String,
    /// Local clock time, `HH:MM`. May be earlier than `wake_up_time` for an overnight window.
    pub bed_time: String,
    pub notification_sound: NotificationSound,
}

impl Default for UserProfile {
    fn default() -> Self {
        Self {
            category: None,
            weight: 70.0,
            height: 175.0,
            habit: None,
            last_urine_color: None,
            wake_up_time: "08:00".into(),
            bed_time: "23:00".into(),
            notification_sound: NotificationSound::Default,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_deserializes_partial_json() {
        let profile: UserProfile = serde_json::from_str(
            r#"{"category":"businessPerson","weight":82.5,"lastUrineColor":"dehydrated","bedTime":"01:30"}"#,
        )
        .unwrap();

        assert_eq!(profile.category, Some(UserCategory::BusinessPerson));
        assert_eq!(profile.weight, 82.5);
        assert_eq!(profile.height, 175.0);
        assert_eq!(profile.last_urine_color, Some(UrineColor::Dehydrated));
        assert_eq!(profile.wake_up_time, "08:00");
        assert_eq!(profile.bed_time, "01:30");
        assert_eq!(profile.notification_sound, NotificationSound::Default);
    }

    #[test]
    fn test_labels_are_turkish() {
        assert_eq!(UserCategory::Athlete.label(), "Sporcu");
        assert_eq!(WaterHabit::Low.label(), "Nadiren Su İçerim");
        assert_eq!(NotificationSound::Chime.label(), "Kristal Çan");
    }
}
