//! Daily streak state machine
//!
//! Driven once per lesson completion. The outcome depends only on how many
//! calendar days separate `last_active_date` from today:
//!
//! | gap                  | effect                                        |
//! |----------------------|-----------------------------------------------|
//! | 0 days               | nothing, already credited today               |
//! | 1 day                | streak + 1                                    |
//! | 2+ days, freeze left | one freeze consumed, streak + 1               |
//! | 2+ days, no freeze   | streak restarts at 1                          |
//!
//! An unparsable `last_active_date` counts as a lapse. A date in the future
//! is treated as today.

use chrono::NaiveDate;
use smarty_core::{format_calendar_date, parse_calendar_date, StreakChange, StreakState};
use tracing::debug;

/// Advance the streak for activity on `today`
pub fn advance(state: &mut StreakState, today: NaiveDate) -> StreakChange {
    let gap = parse_calendar_date(&state.last_active_date).map(|last| (today - last).num_days());

    match gap {
        Some(days) if days <= 0 => {
            if days < 0 {
                debug!(
                    last_active = %state.last_active_date,
                    today = %today,
                    "Last active date is in the future, clamping to today"
                );
                state.last_active_date = format_calendar_date(today);
            }
            StreakChange::Unchanged
        }
        Some(1) => {
            extend(state, today);
            StreakChange::Extended
        }
        _ if state.streak_freeze_count > 0 => {
            state.streak_freeze_count -= 1;
            extend(state, today);
            debug!(
                streak = state.streak_count,
                freezes_left = state.streak_freeze_count,
                "Streak freeze consumed"
            );
            StreakChange::FreezeUsed
        }
        _ => {
            debug!(
                lost_streak = state.streak_count,
                last_active = %state.last_active_date,
                "Streak broken"
            );
            state.streak_count = 1;
            state.longest_streak = state.longest_streak.max(1);
            state.last_active_date = format_calendar_date(today);
            StreakChange::Reset
        }
    }
}

fn extend(state: &mut StreakState, today: NaiveDate) {
    state.streak_count = state.streak_count.saturating_add(1);
    state.longest_streak = state.longest_streak.max(state.streak_count);
    state.last_active_date = format_calendar_date(today);
}

/// Add streak freezes to the inventory
pub fn grant_freeze(state: &mut StreakState, count: u32) {
    state.streak_freeze_count = state.streak_freeze_count.saturating_add(count);
}
