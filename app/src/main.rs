//! Smarty - Main entry point

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use serde::de::DeserializeOwned;
use serde::Serialize;
use smarty_app::commands::{self, SettingsUpdate};
use smarty_app::config::DEFAULT_LOG_FILTER;
use smarty_app::{AppConfig, AppState, TemplateInsights};
use smarty_core::{parse_calendar_date, Language, LessonTheme, Level, MentorPersona, OnboardingAnswers};
use smarty_engine::{Clock, FixedClock, SystemClock};
use smarty_persistence::Database;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "smarty")]
#[command(about = "Gamified AI-literacy lessons with streaks, XP and coins")]
#[command(version)]
struct Cli {
    /// Directory holding the profile database (overrides SMARTY_DATA_DIR)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Pretend today is this date (YYYY-MM-DD)
    #[arg(long, global = true, value_parser = parse_date)]
    today: Option<NaiveDate>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign in, creating the profile on first use
    SignIn {
        account: String,
        #[arg(long, value_parser = parse_enum::<Language>)]
        language: Option<Language>,
    },

    /// Submit the onboarding quiz
    Onboard {
        #[arg(long)]
        name: String,
        #[arg(long, default_value = "")]
        grade: String,
        #[arg(long, value_parser = parse_enum::<Level>, default_value = "beginner")]
        level: Level,
        /// Repeatable
        #[arg(long = "interest")]
        interests: Vec<String>,
        #[arg(long, value_parser = parse_enum::<LessonTheme>, default_value = "minimal")]
        theme: LessonTheme,
        #[arg(long, value_parser = parse_enum::<MentorPersona>)]
        persona: Option<MentorPersona>,
    },

    /// List courses and which lessons are done
    Courses,

    /// Finish a lesson quiz
    CompleteLesson {
        lesson_id: String,
        /// Chosen option per question, in order; omit for a fully correct run
        #[arg(long, value_delimiter = ',')]
        answers: Option<Vec<usize>>,
        /// Time spent in the lesson, in seconds
        #[arg(long, default_value_t = 0)]
        duration: u32,
    },

    /// Show coins, XP, streak and league
    Status,

    /// Change theme or language
    Settings {
        #[arg(long, value_parser = parse_enum::<LessonTheme>)]
        theme: Option<LessonTheme>,
        #[arg(long, value_parser = parse_enum::<Language>)]
        language: Option<Language>,
    },

    /// Add streak freezes to the inventory
    GrantFreeze {
        #[arg(default_value_t = 1)]
        count: u32,
    },

    /// Sign out, keeping the stored profile
    Logout,
}

fn parse_date(raw: &str) -> std::result::Result<NaiveDate, String> {
    parse_calendar_date(raw).ok_or_else(|| format!("expected YYYY-MM-DD, got '{}'", raw))
}

/// Parse a lowercase enum value the same way profiles store it
fn parse_enum<T: DeserializeOwned>(raw: &str) -> std::result::Result<T, String> {
    serde_json::from_value(serde_json::Value::String(raw.to_lowercase()))
        .map_err(|_| format!("unknown value '{}'", raw))
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so command output stays machine-readable
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let mut config = AppConfig::from_env();
    if let Some(dir) = cli.data_dir {
        config.data_dir = dir;
    }

    let db_path = config.db_path();
    let db = Database::connect(&db_path)
        .await
        .with_context(|| format!("opening profile database at {}", db_path.display()))?;

    let clock: Arc<dyn Clock> = match cli.today {
        Some(day) => Arc::new(FixedClock(day)),
        None => Arc::new(SystemClock),
    };
    let state = AppState::new(Arc::new(db), clock, Arc::new(TemplateInsights), config.policy);

    // A broken stored session must not block sign-in or logout
    if let Err(e) = commands::restore(&state).await {
        tracing::warn!(error = %e, "Could not restore the previous session");
    }

    match cli.command {
        Commands::SignIn { account, language } => {
            print_json(&commands::sign_in(&state, &account, language).await?)?;
        }
        Commands::Onboard {
            name,
            grade,
            level,
            interests,
            theme,
            persona,
        } => {
            let answers = OnboardingAnswers {
                name,
                grade,
                level,
                interests,
                theme,
                mentor_persona: persona,
            };
            print_json(&commands::complete_onboarding(&state, answers).await?)?;
        }
        Commands::Courses => {
            print_json(&commands::list_courses(&state).await)?;
        }
        Commands::CompleteLesson {
            lesson_id,
            answers,
            duration,
        } => {
            let completion =
                commands::complete_lesson(&state, &lesson_id, answers, duration).await?;
            print_json(&completion)?;
        }
        Commands::Status => {
            print_json(&commands::status(&state).await?)?;
        }
        Commands::Settings { theme, language } => {
            let update = SettingsUpdate { theme, language };
            print_json(&commands::update_settings(&state, update).await?)?;
        }
        Commands::GrantFreeze { count } => {
            print_json(&commands::grant_streak_freeze(&state, count).await?)?;
        }
        Commands::Logout => {
            commands::logout(&state).await?;
            tracing::info!("Signed out");
        }
    }

    Ok(())
}
