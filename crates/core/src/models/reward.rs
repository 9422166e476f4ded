//! Reward summary returned after a lesson completion

use serde::{Deserialize, Serialize};

/// How the daily streak moved on this completion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StreakChange {
    /// Already credited today
    Unchanged,
    /// Active yesterday, streak grew by one
    Extended,
    /// A lapse was covered by consuming one streak freeze
    FreezeUsed,
    /// A lapse with no freeze left; streak restarted at 1
    Reset,
}

impl StreakChange {
    /// Signed delta shown by the reward modal.
    ///
    /// A reset is reported as `-1` so "streak broken" never looks like
    /// "streak extended" or "already counted today".
    pub fn delta(&self) -> i32 {
        match self {
            StreakChange::Unchanged => 0,
            StreakChange::Extended | StreakChange::FreezeUsed => 1,
            StreakChange::Reset => -1,
        }
    }
}

/// What a single lesson completion earned
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RewardOutcome {
    pub xp_gained: u32,
    pub coins_gained: u32,
    pub streak_delta: i32,
    pub streak_change: StreakChange,
    /// Streak after the completion, for the "current streak" badge
    pub current_streak: u32,
}
