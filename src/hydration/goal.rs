use crate::models::{UrineColor, UserCategory, UserProfile, WaterHabit};

const ML_PER_KG: f64 = 33.0;
const ATHLETE_FACTOR: f64 = 1.2;
const LOW_HABIT_FACTOR: f64 = 0.9;
const DEHYDRATED_FACTOR: f64 = 1.15;

const ML_PER_REMINDER: u32 = 400;
const MIN_REMINDERS: u32 = 2;
const MAX_REMINDERS: u32 = 10;

/// Daily hydration target in milliliters.
///
/// The weight-based figure is rounded to the nearest 100 ml; the dehydration
/// bump is applied afterwards and rounded to the nearest milliliter, so only
/// dehydrated profiles produce goals that are not multiples of 100.
pub fn compute_daily_goal(profile: &UserProfile) -> u32 {
    let mut base = profile.weight * ML_PER_KG;
    if profile.category == Some(UserCategory::Athlete) {
        base *= ATHLETE_FACTOR;
    }
    if profile.habit == Some(WaterHabit::Low) {
        base *= LOW_HABIT_FACTOR;
    }

    let mut goal = (base / 100.0).round() * 100.0;

    if profile.last_urine_color == Some(UrineColor::Dehydrated) {
        goal = (goal * DEHYDRATED_FACTOR).round();
    }

    // NaN and negatives saturate to 0.
    goal.max(0.0) as u32
}

/// Number of reminders for a day: one per 400 ml of goal, between 2 and 10.
pub fn reminder_count(daily_goal: u32) -> u32 {
    (daily_goal / ML_PER_REMINDER).clamp(MIN_REMINDERS, MAX_REMINDERS)
}
