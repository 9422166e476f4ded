//! Shared type definitions and newtypes

use chrono::NaiveDate;
use std::num::NonZeroU32;

/// Calendar date format used for `lastActiveDate` and `weekStartDate`
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse a `YYYY-MM-DD` calendar date. Anything else yields `None`.
pub fn parse_calendar_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).ok()
}

/// Format a calendar date as `YYYY-MM-DD`
pub fn format_calendar_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Share of correctly answered quiz questions.
///
/// The correct count is clamped to the question count, so the ratio never
/// exceeds 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Accuracy {
    correct: u32,
    total: NonZeroU32,
}

impl Accuracy {
    pub fn new(correct: u32, total: NonZeroU32) -> Self {
        Accuracy {
            correct: correct.min(total.get()),
            total,
        }
    }

    /// `round(accuracy * max)` with halves rounded up, in integer arithmetic
    pub fn scaled(&self, max: u32) -> u32 {
        let numerator = 2 * self.correct as u64 * max as u64 + self.total.get() as u64;
        let denominator = 2 * self.total.get() as u64;
        (numerator / denominator) as u32
    }

    pub fn is_perfect(&self) -> bool {
        self.correct == self.total.get()
    }
}
