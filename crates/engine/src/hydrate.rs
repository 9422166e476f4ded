//! Profile hydration
//!
//! Stored profiles may predate any of the gamification fields. Everything
//! the engine touches goes through [`Progression`], a fully populated copy
//! of that state, so default-coalescing happens exactly once.

use chrono::NaiveDate;
use smarty_core::{format_calendar_date, Language, MentorPersona, StreakState, UserProfile};

/// Coins a brand new account starts with
pub const STARTING_COINS: u32 = 100;

/// Streak a brand new account starts with
pub const STARTING_STREAK: u32 = 1;

/// Fully populated gamification state of one profile
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Progression {
    pub coins: u32,
    pub xp_total: u64,
    pub xp_this_week: u64,
    pub streak: StreakState,
}

impl Progression {
    /// Seed state for a brand new account
    pub fn seed(today: NaiveDate) -> Self {
        Progression {
            coins: STARTING_COINS,
            xp_total: 0,
            xp_this_week: 0,
            streak: seeded_streak(STARTING_STREAK, today),
        }
    }

    /// Read the gamification fields of `user`, filling gaps with defaults.
    ///
    /// A missing `streak_state` is rebuilt from the legacy `streak` field and
    /// anchored at `today`. The result always satisfies
    /// `longest_streak >= streak_count >= 1`.
    pub fn hydrate(user: &UserProfile, today: NaiveDate) -> Self {
        let mut streak = user
            .streak_state
            .clone()
            .unwrap_or_else(|| seeded_streak(user.streak.unwrap_or(STARTING_STREAK), today));

        streak.streak_count = streak.streak_count.max(1);
        streak.longest_streak = streak.longest_streak.max(streak.streak_count);

        Progression {
            coins: user.coins.unwrap_or(STARTING_COINS),
            xp_total: user.xp_total.unwrap_or(0),
            xp_this_week: user.xp_this_week.unwrap_or(0),
            streak,
        }
    }

    /// Write this state back into `user`, keeping the legacy `streak` mirror
    /// and the league's weekly XP in sync.
    pub fn write_to(&self, user: &mut UserProfile) {
        user.coins = Some(self.coins);
        user.xp_total = Some(self.xp_total);
        user.xp_this_week = Some(self.xp_this_week);
        user.streak = Some(self.streak.streak_count);
        user.streak_state = Some(self.streak.clone());

        if let Some(league) = user.league.as_mut() {
            league.weekly_xp = self.xp_this_week;
        }
    }
}

fn seeded_streak(count: u32, today: NaiveDate) -> StreakState {
    StreakState {
        streak_count: count,
        last_active_date: format_calendar_date(today),
        streak_freeze_count: 0,
        longest_streak: count,
    }
}

/// Return `user` with every gamification field populated
pub fn hydrate_profile(user: &UserProfile, today: NaiveDate) -> UserProfile {
    let mut hydrated = user.clone();
    Progression::hydrate(user, today).write_to(&mut hydrated);
    if hydrated.mentor_persona.is_none() {
        hydrated.mentor_persona = Some(MentorPersona::default());
    }
    hydrated
}

/// Profile for a first sign-in: 100 coins, a one-day streak anchored today,
/// and no XP.
pub fn new_profile(account: &str, today: NaiveDate, language: Option<Language>) -> UserProfile {
    let mut user = UserProfile::for_account(account);
    user.language = language;
    user.mentor_persona = Some(MentorPersona::default());
    Progression::seed(today).write_to(&mut user);
    user
}
