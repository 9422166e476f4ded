//! Reward amounts per lesson completion

use serde::{Deserialize, Serialize};
use smarty_core::LessonResult;

/// Reward constants applied on every lesson completion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RewardPolicy {
    /// XP for finishing the quiz, whatever the score
    pub base_xp: u32,
    /// XP added at 100% accuracy, scaled down linearly with accuracy
    pub accuracy_bonus_xp: u32,
    /// Coins for finishing the quiz, independent of accuracy
    pub base_coins: u32,
}

impl Default for RewardPolicy {
    fn default() -> Self {
        Self {
            base_xp: 10,
            accuracy_bonus_xp: 10,
            base_coins: 10,
        }
    }
}

impl RewardPolicy {
    /// `base_xp + round(accuracy * accuracy_bonus_xp)`
    pub fn xp_for(&self, result: &LessonResult) -> u32 {
        self.base_xp
            .saturating_add(result.accuracy().scaled(self.accuracy_bonus_xp))
    }

    /// Participation reward; the score does not matter
    pub fn coins_for(&self, _result: &LessonResult) -> u32 {
        self.base_coins
    }
}
