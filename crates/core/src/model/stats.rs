use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Cards a fresh profile aims to review per day.
pub const DEFAULT_DAILY_GOAL: u32 = 20;

/// Number of buckets in the weekly activity chart.
pub const ACTIVITY_DAYS: usize = 7;

/// Study statistics tracked per profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    /// Consecutive calendar days with at least one completed session.
    pub streak: u32,
    pub daily_goal: u32,
    /// Cards reviewed on `last_study_date`.
    pub daily_progress: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_study_date: Option<NaiveDate>,
    pub total_cards_reviewed: u64,
    /// Reviews per bucket, oldest first. Sessions always land in the last slot.
    pub activity_data: [u32; ACTIVITY_DAYS],
}

impl Default for Stats {
    fn default() -> Self {
        Self {
            streak: 0,
            daily_goal: DEFAULT_DAILY_GOAL,
            daily_progress: 0,
            last_study_date: None,
            total_cards_reviewed: 0,
            activity_data: [0; ACTIVITY_DAYS],
        }
    }
}

impl Stats {
    /// Share of the daily goal reached, capped at 100.
    #[must_use]
    pub fn daily_goal_percent(&self) -> u8 {
        percent_of_goal(self.daily_progress, self.daily_goal)
    }
}

/// `round(value / goal * 100)`, capped at 100. A zero goal falls back to the default.
#[must_use]
pub fn percent_of_goal(value: u32, goal: u32) -> u8 {
    let goal = if goal == 0 { DEFAULT_DAILY_GOAL } else { goal };
    let pct = (f64::from(value) / f64::from(goal) * 100.0).round();
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let pct = pct.min(100.0) as u8;
    pct
}
