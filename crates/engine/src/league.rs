//! League week rollover
//!
//! `xp_this_week` accumulates over an ISO week (Monday to Sunday). The
//! session rolls the week over when a profile is loaded; lesson completion
//! itself never resets anything.

use chrono::{Datelike, Duration, NaiveDate};
use smarty_core::{format_calendar_date, parse_calendar_date, LeagueState, LeagueTier, UserProfile};
use tracing::info;

/// Monday of the ISO week containing `date`
pub fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(date.weekday().num_days_from_monday() as i64)
}

/// Start a new league week if `today` falls outside the stored one.
///
/// Returns `true` when weekly XP was reset. A profile without league state
/// gets one seeded for the current week, keeping its weekly XP.
pub fn roll_league_week(user: &mut UserProfile, today: NaiveDate) -> bool {
    let current = week_start(today);

    let Some(league) = user.league.as_mut() else {
        user.league = Some(LeagueState {
            tier: LeagueTier::default(),
            weekly_xp: user.xp_this_week.unwrap_or(0),
            week_start_date: format_calendar_date(current),
            rank: None,
        });
        return false;
    };

    let stored = parse_calendar_date(&league.week_start_date).map(week_start);
    if stored == Some(current) {
        return false;
    }

    info!(
        account = %user.email,
        previous_week = %league.week_start_date,
        weekly_xp = league.weekly_xp,
        "League week rolled over"
    );

    league.weekly_xp = 0;
    league.rank = None;
    league.week_start_date = format_calendar_date(current);
    user.xp_this_week = Some(0);
    true
}
