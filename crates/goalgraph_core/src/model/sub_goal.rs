//! Individual goals tracked inside one category.
//!
//! The checklist screen that edits these lives outside core; core only owns
//! the record shape and the progress summary derived from it.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Title given to a freshly added sub-goal.
pub const DEFAULT_SUB_GOAL_TITLE: &str = "New Goal";

pub type SubGoalId = Uuid;

/// One checklist item under a category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubGoal {
    pub id: SubGoalId,
    pub title: String,
    pub completed: bool,
    /// Unix epoch milliseconds.
    pub deadline: Option<i64>,
    pub description: Option<String>,
}

impl SubGoal {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            completed: false,
            deadline: None,
            description: None,
        }
    }

    pub fn toggle_completed(&mut self) {
        self.completed = !self.completed;
    }
}

/// "k of n goals completed" summary for one category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GoalProgress {
    pub completed: usize,
    pub total: usize,
}

impl GoalProgress {
    pub fn from_sub_goals(goals: &[SubGoal]) -> Self {
        Self {
            completed: goals.iter().filter(|goal| goal.completed).count(),
            total: goals.len(),
        }
    }

    /// Rounded completion percentage; an empty checklist reports 0.
    pub fn percent(&self) -> u8 {
        if self.total == 0 {
            return 0;
        }
        let scaled = (self.completed * 200 + self.total) / (self.total * 2);
        u8::try_from(scaled.min(100)).unwrap_or(100)
    }
}

#[cfg(test)]
mod tests {
    use super::{GoalProgress, SubGoal, DEFAULT_SUB_GOAL_TITLE};

    #[test]
    fn new_sub_goal_starts_open() {
        let goal = SubGoal::new(DEFAULT_SUB_GOAL_TITLE);
        assert_eq!(goal.title, "New Goal");
        assert!(!goal.completed);
        assert_eq!(goal.deadline, None);
    }

    #[test]
    fn progress_counts_completed_and_rounds_percent() {
        let mut goals: Vec<SubGoal> = (0..5).map(|i| SubGoal::new(format!("g{i}"))).collect();
        goals[0].toggle_completed();
        goals[1].toggle_completed();

        let progress = GoalProgress::from_sub_goals(&goals);
        assert_eq!(progress.completed, 2);
        assert_eq!(progress.total, 5);
        assert_eq!(progress.percent(), 40);

        let thirds = GoalProgress {
            completed: 2,
            total: 3,
        };
        assert_eq!(thirds.percent(), 67);
    }

    #[test]
    fn empty_checklist_reports_zero_percent() {
        assert_eq!(GoalProgress::from_sub_goals(&[]).percent(), 0);
    }

    #[test]
    fn toggle_is_reversible() {
        let mut goal = SubGoal::new("ship");
        goal.toggle_completed();
        assert!(goal.completed);
        goal.toggle_completed();
        assert!(!goal.completed);
    }
}
