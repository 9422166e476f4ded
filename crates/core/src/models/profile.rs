//! User profile models as persisted by the storage layer

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Interface language
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Vi,
}

/// Visual theme of the lesson viewer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LessonTheme {
    #[default]
    Minimal,
    Cyberpunk,
    Academic,
    Playful,
}

/// Self-reported experience level from the onboarding quiz
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    #[default]
    Beginner,
    Intermediate,
    Advanced,
}

/// Tone of the chat mentor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MentorPersona {
    #[default]
    Friendly,
    Strict,
    Funny,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeakArea {
    Logic,
    Genai,
    Ethics,
    Foundations,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LeagueTier {
    #[default]
    Bronze,
    Silver,
    Gold,
    Platinum,
    Diamond,
}

/// Daily streak bookkeeping
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StreakState {
    /// Current daily streak in days
    #[serde(default, deserialize_with = "deserialize_lenient_u32_or_zero")]
    pub streak_count: u32,
    /// Last day the user was active (`YYYY-MM-DD`). Kept raw so a malformed
    /// value survives loading and is handled by the streak rules.
    #[serde(default, deserialize_with = "deserialize_lenient_string")]
    pub last_active_date: String,
    /// Available "streak freeze" items
    #[serde(default, deserialize_with = "deserialize_lenient_u32_or_zero")]
    pub streak_freeze_count: u32,
    /// Longest streak ever achieved
    #[serde(default, deserialize_with = "deserialize_lenient_u32_or_zero")]
    pub longest_streak: u32,
}

/// Weekly league standing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeagueState {
    #[serde(default)]
    pub tier: LeagueTier,
    #[serde(default, deserialize_with = "deserialize_lenient_u64_or_zero")]
    pub weekly_xp: u64,
    /// Start of the league week (`YYYY-MM-DD`)
    #[serde(default, deserialize_with = "deserialize_lenient_string")]
    pub week_start_date: String,
    #[serde(
        default,
        deserialize_with = "deserialize_lenient_u32",
        skip_serializing_if = "Option::is_none"
    )]
    pub rank: Option<u32>,
}

/// Stored user profile.
///
/// Gamification fields are optional because older snapshots predate them;
/// the engine hydrates defaults before computing anything.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub name: String,
    /// Account identifier (the storage key)
    pub email: String,
    #[serde(default)]
    pub grade: String,
    #[serde(default)]
    pub level: Level,
    #[serde(default)]
    pub interests: Vec<String>,
    #[serde(default)]
    pub theme: LessonTheme,
    #[serde(default)]
    pub onboarded: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub smart_insights: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<Language>,

    // ─── Gamification ────────────────────────────────────────────
    #[serde(
        default,
        deserialize_with = "deserialize_lenient_u32",
        skip_serializing_if = "Option::is_none"
    )]
    pub coins: Option<u32>,
    /// Legacy streak field; mirror of `streak_state.streak_count`
    #[serde(
        default,
        deserialize_with = "deserialize_lenient_u32",
        skip_serializing_if = "Option::is_none"
    )]
    pub streak: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub streak_state: Option<StreakState>,
    #[serde(
        default,
        deserialize_with = "deserialize_lenient_u64",
        skip_serializing_if = "Option::is_none"
    )]
    pub xp_total: Option<u64>,
    #[serde(
        default,
        deserialize_with = "deserialize_lenient_u64",
        skip_serializing_if = "Option::is_none"
    )]
    pub xp_this_week: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub league: Option<LeagueState>,
    /// Mistake weight per topic; fractional scores are allowed
    #[serde(
        default,
        deserialize_with = "deserialize_weak_areas",
        skip_serializing_if = "Option::is_none"
    )]
    pub weak_areas: Option<HashMap<WeakArea, f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mentor_persona: Option<MentorPersona>,

    // ─── Productivity ────────────────────────────────────────────
    /// Weekly school timetable keyed by day of week (0 = Sunday)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timetable: Option<BTreeMap<u8, Vec<TimetableEntry>>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// One class slot in the calendar view
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimetableEntry {
    pub subject: String,
    /// Start time, `HH:MM`
    pub time: String,
    pub end_time: String,
}

impl UserProfile {
    /// Bare profile for a freshly authenticated account, before any defaults
    /// are seeded.
    pub fn for_account(account: &str) -> Self {
        UserProfile {
            name: account.to_string(),
            email: account.to_string(),
            grade: String::new(),
            level: Level::default(),
            interests: Vec::new(),
            theme: LessonTheme::default(),
            onboarded: false,
            smart_insights: None,
            language: None,
            coins: None,
            streak: None,
            streak_state: None,
            xp_total: None,
            xp_this_week: None,
            league: None,
            weak_areas: None,
            mentor_persona: None,
            timetable: None,
            notes: None,
        }
    }

    /// Current streak as shown in the header badge
    pub fn current_streak(&self) -> u32 {
        self.streak_state
            .as_ref()
            .map(|s| s.streak_count)
            .or(self.streak)
            .unwrap_or(0)
    }
}

/// Onboarding quiz answers merged into the profile
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OnboardingAnswers {
    pub name: String,
    #[serde(default)]
    pub grade: String,
    #[serde(default)]
    pub level: Level,
    #[serde(default)]
    pub interests: Vec<String>,
    #[serde(default)]
    pub theme: LessonTheme,
    #[serde(default)]
    pub mentor_persona: Option<MentorPersona>,
}

// ─── Lenient number parsing ──────────────────────────────────────────
//
// Snapshots written by older clients carry counts as floats, strings,
// negatives or null. Negatives clamp to zero, floats truncate, and anything
// unreadable is treated as missing.

struct LenientCount;

impl<'de> serde::de::Visitor<'de> for LenientCount {
    type Value = Option<u64>;

    fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
        formatter.write_str("a number, numeric string, or null")
    }

    fn visit_u64<E: serde::de::Error>(self, v: u64) -> std::result::Result<Self::Value, E> {
        Ok(Some(v))
    }

    fn visit_i64<E: serde::de::Error>(self, v: i64) -> std::result::Result<Self::Value, E> {
        Ok(Some(v.max(0) as u64))
    }

    fn visit_f64<E: serde::de::Error>(self, v: f64) -> std::result::Result<Self::Value, E> {
        if v.is_finite() {
            Ok(Some(v.max(0.0).trunc() as u64))
        } else {
            Ok(None)
        }
    }

    fn visit_str<E: serde::de::Error>(self, v: &str) -> std::result::Result<Self::Value, E> {
        match v.trim().parse::<f64>() {
            Ok(n) => self.visit_f64(n),
            Err(_) => Ok(None),
        }
    }

    fn visit_bool<E: serde::de::Error>(self, _v: bool) -> std::result::Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_none<E: serde::de::Error>(self) -> std::result::Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_unit<E: serde::de::Error>(self) -> std::result::Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_some<D>(self, deserializer: D) -> std::result::Result<Self::Value, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        deserializer.deserialize_any(LenientCount)
    }
}

fn deserialize_lenient_u64<'de, D>(deserializer: D) -> std::result::Result<Option<u64>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    deserializer.deserialize_any(LenientCount)
}

fn deserialize_lenient_u32<'de, D>(deserializer: D) -> std::result::Result<Option<u32>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(deserialize_lenient_u64(deserializer)?.map(|v| v.min(u32::MAX as u64) as u32))
}

fn deserialize_lenient_u32_or_zero<'de, D>(deserializer: D) -> std::result::Result<u32, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(deserialize_lenient_u32(deserializer)?.unwrap_or(0))
}

fn deserialize_lenient_u64_or_zero<'de, D>(deserializer: D) -> std::result::Result<u64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(deserialize_lenient_u64(deserializer)?.unwrap_or(0))
}

/// Weak-area scores: unknown topics and non-numeric scores are dropped
fn deserialize_weak_areas<'de, D>(
    deserializer: D,
) -> std::result::Result<Option<HashMap<WeakArea, f64>>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = Option::<HashMap<String, serde_json::Value>>::deserialize(deserializer)?;
    Ok(raw.map(|entries| {
        entries
            .into_iter()
            .filter_map(|(key, score)| {
                let area = serde_json::from_value(serde_json::Value::String(key)).ok()?;
                let score = match score {
                    serde_json::Value::Number(n) => n.as_f64()?,
                    serde_json::Value::String(s) => s.trim().parse().ok()?,
                    _ => return None,
                };
                score.is_finite().then_some((area, score))
            })
            .collect()
    }))
}

/// Strings that may arrive as null or a non-string scalar
fn deserialize_lenient_string<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::String(s) => s,
        serde_json::Value::Null => String::new(),
        other => other.to_string(),
    })
}
