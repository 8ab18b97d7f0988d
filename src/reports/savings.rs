//! Savings goal progress
//!
//! The progress percentage is computed twice on purpose: once unclamped
//! for the "125.0% complete" label, and once clamped to [0, 100] for the
//! progress bar's visual width. Callers must not conflate the two.

use crate::models::{Money, SavingsGoal};

/// Progress figures for one savings goal
#[derive(Debug, Clone, PartialEq)]
pub struct GoalProgress {
    /// Saved / target as a percentage, unclamped (may exceed 100)
    pub percent: f64,

    /// Bar-width percentage, clamped to [0, 100]
    pub bar_width: f64,

    /// Target minus saved; negative once the goal is over-saved
    pub remaining: Money,

    /// Whether the goal has reached its target
    pub completed: bool,
}

impl GoalProgress {
    /// Compute progress for a goal
    pub fn for_goal(goal: &SavingsGoal) -> Self {
        let percent = goal.current_amount.ratio_of(goal.target_amount) * 100.0;
        Self {
            percent,
            bar_width: percent.clamp(0.0, 100.0),
            remaining: goal.target_amount - goal.current_amount,
            completed: percent >= 100.0,
        }
    }
}

/// Aggregate savings figures across all goals
#[derive(Debug, Clone, PartialEq)]
pub struct SavingsSummary {
    pub goal_count: usize,
    pub total_saved: Money,
    pub total_target: Money,
    /// Mean of per-goal progress percentages; 0 when there are no goals
    pub average_progress: f64,
}

impl SavingsSummary {
    /// Compute the summary over a set of goals
    pub fn generate(goals: &[SavingsGoal]) -> Self {
        let total_saved = goals.iter().map(|goal| goal.current_amount).sum();
        let total_target = goals.iter().map(|goal| goal.target_amount).sum();
        let average_progress = if goals.is_empty() {
            0.0
        } else {
            let ratios: f64 = goals
                .iter()
                .map(|goal| goal.current_amount.ratio_of(goal.target_amount))
                .sum();
            ratios / goals.len() as f64 * 100.0
        };

        Self {
            goal_count: goals.len(),
            total_saved,
            total_target,
            average_progress,
        }
    }
}
