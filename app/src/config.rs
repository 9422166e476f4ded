//! Application configuration loaded from environment variables

use smarty_engine::RewardPolicy;
use std::path::PathBuf;
use std::str::FromStr;
use tracing::warn;

/// Default tracing filter when `RUST_LOG` is unset
pub const DEFAULT_LOG_FILTER: &str =
    "smarty=info,smarty_app=info,smarty_engine=info,smarty_persistence=info";

/// Application configuration, loaded once at startup
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Directory holding the profile database
    pub data_dir: PathBuf,
    /// Database file name inside `data_dir`
    pub db_file: String,
    /// Reward amounts per lesson completion
    pub policy: RewardPolicy,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            db_file: "smarty.db".to_string(),
            policy: RewardPolicy::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from the process environment.
    ///
    /// - `SMARTY_DATA_DIR`: data directory (default: local data dir + `Smarty`)
    /// - `SMARTY_DB_FILE`: database file name (default: `smarty.db`)
    /// - `SMARTY_BASE_XP`, `SMARTY_ACCURACY_BONUS_XP`, `SMARTY_BASE_COINS`:
    ///   reward policy overrides
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let policy = defaults.policy;

        Self {
            data_dir: lookup("SMARTY_DATA_DIR")
                .filter(|v| !v.trim().is_empty())
                .map(PathBuf::from)
                .unwrap_or(defaults.data_dir),
            db_file: lookup("SMARTY_DB_FILE")
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .unwrap_or(defaults.db_file),
            policy: RewardPolicy {
                base_xp: parse_or(&lookup, "SMARTY_BASE_XP", policy.base_xp),
                accuracy_bonus_xp: parse_or(
                    &lookup,
                    "SMARTY_ACCURACY_BONUS_XP",
                    policy.accuracy_bonus_xp,
                ),
                base_coins: parse_or(&lookup, "SMARTY_BASE_COINS", policy.base_coins),
            },
        }
    }

    /// Full path of the profile database
    pub fn db_path(&self) -> PathBuf {
        self.data_dir.join(&self.db_file)
    }
}

fn default_data_dir() -> PathBuf {
    dirs_next::data_local_dir()
        .map(|p| p.join("Smarty"))
        .unwrap_or_else(|| PathBuf::from("."))
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> T
where
    F: Fn(&str) -> Option<String>,
    T: FromStr + Copy + std::fmt::Display,
{
    match lookup(key) {
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!(key, value = %raw, default = %default, "Ignoring unparsable setting");
            default
        }),
        None => default,
    }
}
