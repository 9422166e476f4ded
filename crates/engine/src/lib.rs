//! Smarty Engine - Progression rules: XP, coins, streaks, and league weeks

pub mod clock;
pub mod hydrate;
pub mod league;
pub mod progression;
pub mod streak;

pub use clock::{Clock, FixedClock, SystemClock};
pub use hydrate::{hydrate_profile, new_profile, Progression};
pub use progression::{apply_lesson_rewards, apply_lesson_rewards_with, LessonOutcome, RewardPolicy};
