use crate::models::{UrineColor, UserCategory, UserProfile};

fn category_context(category: Option<UserCategory>) -> &'static str {
    match category {
        Some(UserCategory::Athlete) => {
            "They train for peak physical performance and fast recovery. Talk about cellular hydration, endurance and avoiding cramps."
        }
        Some(UserCategory::BusinessPerson) => {
            "They need sustained mental clarity and sharp decisions through long workdays. Talk about focus, cognition and avoiding mental fatigue."
        }
        Some(UserCategory::Student) => {
            "They want better memory, concentration and less stress while studying. Talk about brain function, learning and exam performance."
        }
        None => {
            "They want general well-being and a healthy habit. Talk about energy, mood and vitality."
        }
    }
}

fn hydration_status_context(urine_color: Option<UrineColor>) -> &'static str {
    match urine_color {
        Some(UrineColor::Dehydrated) => {
            "Their last check-in shows dehydration. Be motivating and slightly urgent."
        }
        Some(UrineColor::Optimal) => {
            "Their last check-in shows optimal hydration. Encourage them to keep it up."
        }
        _ => "Their hydration status is unknown. Give a general but powerful reminder.",
    }
}

/// Prompt for a single short Turkish reminder tailored to the profile.
pub fn build_reminder_prompt(profile: &UserProfile) -> String {
    let category = profile
        .category
        .map(|c| c.label())
        .unwrap_or("Belirtilmemiş");
    let status = profile
        .last_urine_color
        .map(|c| c.label())
        .unwrap_or("Normal");

    format!(
        "You write water reminder notifications for 'Aqua Vita', a minimalist hydration app, \
combining behavioral science with a coach's voice.\n\
Write the message in TURKISH.\n\n\
User profile:\n\
- Category: {category}\n\
- Context: {context}\n\
- Hydration status: {status_context}\n\n\
Produce one short, compelling reminder under 15 words. Be sharp and inspiring, \
avoid generic phrases such as 'su içmeyi unutma', and use words tied to the user's \
context and current hydration need.\n\n\
Examples:\n\
- Athlete, dehydrated: 'Kasların sinyal veriyor. Dehidrasyonu zafere dönüştür.'\n\
- Business person, optimal: 'Zihinsel akışını koru. Zirvedesin, orada kal.'\n\
- Student, dehydrated: 'Odaklanma gücünü geri kazan. O notlar seni bekliyor.'\n\n\
Now write one for a {category} user whose hydration status is: {status}.",
        context = category_context(profile.category),
        status_context = hydration_status_context(profile.last_urine_color),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_mentions_category_and_status() {
        let profile = UserProfile {
            category: Some(UserCategory::Student),
            last_urine_color: Some(UrineColor::Dehydrated),
            ..UserProfile::default()
        };
        let prompt = build_reminder_prompt(&profile);

        assert!(prompt.contains("Category: Öğrenci"));
        assert!(prompt.contains("exam performance"));
        assert!(prompt.contains("slightly urgent"));
        assert!(prompt.contains("status is: Dehidre (Koyu Sarı/Turuncu)"));
    }

    #[test]
    fn test_prompt_for_blank_profile() {
        let prompt = build_reminder_prompt(&UserProfile::default());
        assert!(prompt.contains("Category: Belirtilmemiş"));
        assert!(prompt.contains("status is unknown"));
        assert!(prompt.ends_with("hydration status is: Normal."));
    }
}
