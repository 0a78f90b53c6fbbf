use serde::Serialize;

/// Amount added by the dashboard's "add a glass" action, ml.
pub const GLASS_ML: u32 = 200;

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct IntakeUpdate {
    pub total: u32,
    /// True only for the update that first crosses the goal.
    pub goal_reached: bool,
}

/// Cumulative intake for the current day.
#[derive(Debug, Clone, Default)]
pub struct IntakeTracker {
    total: u32,
}

impl IntakeTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn total(&self) -> u32 {
        self.total
    }

    pub fn add(&mut self, amount: u32, goal: u32) -> IntakeUpdate {
        let was_met = self.total >= goal;
        self.total = self.total.saturating_add(amount);
        IntakeUpdate {
            total: self.total,
            goal_reached: !was_met && self.total >= goal,
        }
    }

    pub fn reset(&mut self) {
        self.total = 0;
    }
}

/// Percentage of the goal consumed, capped at 100.
pub fn progress_percent(intake: u32, goal: u32) -> f64 {
    if goal == 0 {
        return 100.0;
    }
    (intake as f64 / goal as f64 * 100.0).min(100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_goal_reached_fires_once() {
        let mut tracker = IntakeTracker::new();
        let goal = 500;

        assert!(!tracker.add(GLASS_ML, goal).goal_reached);
        assert!(!tracker.add(GLASS_ML, goal).goal_reached);
        let crossing = tracker.add(GLASS_ML, goal);
        assert!(crossing.goal_reached);
        assert_eq!(crossing.total, 600);
        assert!(!tracker.add(GLASS_ML, goal).goal_reached);
    }

    #[test]
    fn test_progress_is_capped() {
        assert_eq!(progress_percent(0, 2000), 0.0);
        assert_eq!(progress_percent(1000, 2000), 50.0);
        assert_eq!(progress_percent(5000, 2000), 100.0);
        assert_eq!(progress_percent(0, 0), 100.0);
    }
}
