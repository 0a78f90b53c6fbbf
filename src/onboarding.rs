use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

use crate::models::UserProfile;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub enum OnboardingStep {
    /// Category selection.
    #[default]
    Welcome,
    Metrics,
    Habits,
    Dashboard,
}

/// Linear wizard leading to the dashboard.
#[derive(Debug, Clone, Default)]
pub struct Onboarding {
    step: OnboardingStep,
}

impl Onboarding {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn completed() -> Self {
        Self {
            step: OnboardingStep::Dashboard,
        }
    }

    pub fn step(&self) -> OnboardingStep {
        self.step
    }

    pub fn is_dashboard(&self) -> bool {
        self.step == OnboardingStep::Dashboard
    }

    pub fn can_advance(&self, profile: &UserProfile) -> bool {
        match self.step {
            OnboardingStep::Welcome => profile.category.is_some(),
            OnboardingStep::Metrics => true,
            OnboardingStep::Habits => profile.habit.is_some(),
            OnboardingStep::Dashboard => false,
        }
    }

    pub fn next(&mut self, profile: &UserProfile) -> Result<OnboardingStep> {
        if !self.can_advance(profile) {
            match self.step {
                OnboardingStep::Welcome => bail!("select a category first"),
                OnboardingStep::Habits => bail!("select a water habit first"),
                _ => bail!("onboarding already finished"),
            }
        }

        self.step = match self.step {
            OnboardingStep::Welcome => OnboardingStep::Metrics,
            OnboardingStep::Metrics => OnboardingStep::Habits,
            OnboardingStep::Habits | OnboardingStep::Dashboard => OnboardingStep::Dashboard,
        };
        Ok(self.step)
    }

    /// Steps back within the wizard. The dashboard has no way back.
    pub fn back(&mut self) -> OnboardingStep {
        self.step = match self.step {
            OnboardingStep::Metrics => OnboardingStep::Welcome,
            OnboardingStep::Habits => OnboardingStep::Metrics,
            other => other,
        };
        self.step
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{UserCategory, WaterHabit};

    #[test]
    fn test_full_flow_requires_category_and_habit() {
        let mut onboarding = Onboarding::new();
        let mut profile = UserProfile::default();

        assert!(onboarding.next(&profile).is_err());
        assert_eq!(onboarding.step(), OnboardingStep::Welcome);

        profile.category = Some(UserCategory::Student);
        assert_eq!(onboarding.next(&profile).unwrap(), OnboardingStep::Metrics);
        assert_eq!(onboarding.next(&profile).unwrap(), OnboardingStep::Habits);
        assert!(onboarding.next(&profile).is_err());

        profile.habit = Some(WaterHabit::High);
        assert_eq!(onboarding.next(&profile).unwrap(), OnboardingStep::Dashboard);
        assert!(onboarding.is_dashboard());
        assert!(onboarding.next(&profile).is_err());
    }

    #[test]
    fn test_back_navigation() {
        let profile = UserProfile {
            category: Some(UserCategory::Athlete),
            ..UserProfile::default()
        };
        let mut onboarding = Onboarding::new();
        assert_eq!(onboarding.back(), OnboardingStep::Welcome);

        onboarding.next(&profile).unwrap();
        onboarding.next(&profile).unwrap();
        assert_eq!(onboarding.back(), OnboardingStep::Metrics);
        assert_eq!(onboarding.back(), OnboardingStep::Welcome);

        let mut done = Onboarding::completed();
        assert_eq!(done.back(), OnboardingStep::Dashboard);
    }
}
