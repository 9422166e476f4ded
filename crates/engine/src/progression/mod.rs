//! Progression engine - turns a finished lesson into XP, coins and a streak update
//!
//! Pure computation: the caller supplies today's date and persists the
//! returned profile.

mod policy;

pub use policy::RewardPolicy;

use crate::hydrate::Progression;
use crate::streak;
use chrono::NaiveDate;
use serde::Serialize;
use smarty_core::{LessonResult, RewardOutcome, UserProfile};
use tracing::debug;

/// Updated profile plus what was gained, for the reward modal
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LessonOutcome {
    pub user: UserProfile,
    pub rewards: RewardOutcome,
}

/// Apply the default reward policy to a completed lesson
pub fn apply_lesson_rewards(
    user: &UserProfile,
    result: &LessonResult,
    today: NaiveDate,
) -> LessonOutcome {
    apply_lesson_rewards_with(&RewardPolicy::default(), user, result, today)
}

/// Apply `policy` to a completed lesson.
///
/// Never fails: missing or malformed profile fields are hydrated with
/// defaults first. Coins and XP only grow, and the streak count is at least
/// 1 afterwards.
pub fn apply_lesson_rewards_with(
    policy: &RewardPolicy,
    user: &UserProfile,
    result: &LessonResult,
    today: NaiveDate,
) -> LessonOutcome {
    let mut progression = Progression::hydrate(user, today);

    let xp_gained = policy.xp_for(result);
    let coins_gained = policy.coins_for(result);

    progression.xp_total = progression.xp_total.saturating_add(xp_gained as u64);
    progression.xp_this_week = progression.xp_this_week.saturating_add(xp_gained as u64);
    progression.coins = progression.coins.saturating_add(coins_gained);

    let streak_change = streak::advance(&mut progression.streak, today);

    let mut updated = user.clone();
    progression.write_to(&mut updated);

    debug!(
        account = %user.email,
        xp_gained,
        coins_gained,
        streak = progression.streak.streak_count,
        change = ?streak_change,
        "Lesson rewards applied"
    );

    LessonOutcome {
        user: updated,
        rewards: RewardOutcome {
            xp_gained,
            coins_gained,
            streak_delta: streak_change.delta(),
            streak_change,
            current_streak: progression.streak.streak_count,
        },
    }
}
