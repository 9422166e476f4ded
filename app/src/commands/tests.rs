use super::*;
use crate::insights::{InsightProvider, TemplateInsights, FALLBACK_INSIGHT};
use crate::state::AppState;
use crate::view::{View, ViewEvent};
use async_trait::async_trait;
use chrono::NaiveDate;
use smarty_core::{
    Error, LessonTheme, Level, OnboardingAnswers, StreakChange, UserProfile,
};
use smarty_engine::{FixedClock, RewardPolicy};
use smarty_persistence::{MemoryStore, ProfileStore};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

const ACCOUNT: &str = "student@example.com";

struct FailingInsights;

#[async_trait]
impl InsightProvider for FailingInsights {
    async fn generate_insights(&self, _user: &UserProfile) -> smarty_core::Result<String> {
        Err(Error::InsightError("model offline".to_string()))
    }
}

/// Delegates to a `MemoryStore` but can be told to reject profile writes
#[derive(Default)]
struct FlakyStore {
    inner: MemoryStore,
    fail_user_writes: AtomicBool,
}

#[async_trait]
impl ProfileStore for FlakyStore {
    async fn get_user_by_account(&self, account: &str) -> smarty_core::Result<Option<UserProfile>> {
        self.inner.get_user_by_account(account).await
    }

    async fn save_user(&self, user: &UserProfile) -> smarty_core::Result<()> {
        if self.fail_user_writes.load(Ordering::SeqCst) {
            return Err(Error::DatabaseError("disk full".to_string()));
        }
        self.inner.save_user(user).await
    }

    async fn get_progress(&self, account: &str) -> smarty_core::Result<Vec<String>> {
        self.inner.get_progress(account).await
    }

    async fn save_progress(&self, account: &str, lessons: &[String]) -> smarty_core::Result<()> {
        self.inner.save_progress(account, lessons).await
    }

    async fn get_active_account(&self) -> smarty_core::Result<Option<String>> {
        self.inner.get_active_account().await
    }

    async fn set_active_account(&self, account: &str) -> smarty_core::Result<()> {
        self.inner.set_active_account(account).await
    }

    async fn logout(&self) -> smarty_core::Result<()> {
        self.inner.logout().await
    }

    async fn get_global_student_count(&self) -> smarty_core::Result<u64> {
        self.inner.get_global_student_count().await
    }
}

fn flaky_app(store: &Arc<FlakyStore>) -> AppState {
    AppState::new(
        store.clone(),
        Arc::new(FixedClock(date(2026, 10, 12))),
        Arc::new(TemplateInsights),
        RewardPolicy::default(),
    )
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// A fresh app run against `store` on `today`
fn app_on(store: &Arc<MemoryStore>, today: NaiveDate) -> AppState {
    AppState::new(
        store.clone(),
        Arc::new(FixedClock(today)),
        Arc::new(TemplateInsights),
        RewardPolicy::default(),
    )
}

fn answers() -> OnboardingAnswers {
    OnboardingAnswers {
        name: "Linh".to_string(),
        grade: "10".to_string(),
        level: Level::Beginner,
        interests: vec!["music".to_string(), "games".to_string()],
        theme: LessonTheme::Cyberpunk,
        mentor_persona: None,
    }
}

async fn onboarded_app(store: &Arc<MemoryStore>, today: NaiveDate) -> AppState {
    let app = app_on(store, today);
    sign_in(&app, ACCOUNT, None).await.unwrap();
    complete_onboarding(&app, answers()).await.unwrap();
    app
}

/// Simulates reopening the app on another day
async fn reopen(store: &Arc<MemoryStore>, today: NaiveDate) -> AppState {
    let app = app_on(store, today);
    assert!(restore(&app).await.unwrap().is_some());
    app
}

#[tokio::test]
async fn test_first_sign_in_seeds_profile() {
    let store = Arc::new(MemoryStore::new());
    let app = app_on(&store, date(2026, 10, 12));

    let result = sign_in(&app, ACCOUNT, None).await.unwrap();

    assert!(result.created);
    assert_eq!(result.view, View::Onboarding);
    let user = &result.session.user;
    assert_eq!(user.coins, Some(100));
    assert_eq!(user.xp_total, Some(0));
    assert_eq!(user.current_streak(), 1);
    assert_eq!(user.streak_state.as_ref().unwrap().last_active_date, "2026-10-12");
    assert_eq!(user.league.as_ref().unwrap().week_start_date, "2026-10-12");
    assert!(!user.onboarded);

    assert_eq!(store.get_active_account().await.unwrap().as_deref(), Some(ACCOUNT));
    assert_eq!(global_student_count(&app).await.unwrap(), 1);
}

#[tokio::test]
async fn test_sign_in_rejects_blank_account() {
    let store = Arc::new(MemoryStore::new());
    let app = app_on(&store, date(2026, 10, 12));

    let err = sign_in(&app, "   ", None).await.unwrap_err();
    assert!(matches!(err, Error::InvalidData(_)));
    assert!(store.is_empty());
}

#[tokio::test]
async fn test_lessons_require_onboarding() {
    let store = Arc::new(MemoryStore::new());
    let app = app_on(&store, date(2026, 10, 12));
    sign_in(&app, ACCOUNT, None).await.unwrap();

    let err = complete_lesson(&app, "what-is-ai", None, 60).await.unwrap_err();
    assert!(matches!(err, Error::NotOnboarded(_)));
}

#[tokio::test]
async fn test_commands_need_a_session() {
    let store = Arc::new(MemoryStore::new());
    let app = app_on(&store, date(2026, 10, 12));

    assert!(matches!(
        complete_lesson(&app, "what-is-ai", None, 60).await,
        Err(Error::NoActiveAccount)
    ));
    assert!(matches!(status(&app).await, Err(Error::NoActiveAccount)));
    assert!(restore(&app).await.unwrap().is_none());
}

#[tokio::test]
async fn test_onboarding_attaches_insights() {
    let store = Arc::new(MemoryStore::new());
    let app = onboarded_app(&store, date(2026, 10, 12)).await;

    let session = app.session().await.unwrap();
    assert!(session.user.onboarded);
    assert_eq!(session.user.name, "Linh");
    assert_eq!(session.user.theme, LessonTheme::Cyberpunk);
    let insight = session.user.smart_insights.unwrap();
    assert!(insight.contains("music"));
    assert_eq!(app.view().await, View::Pathway);

    let stored = store.get_user_by_account(ACCOUNT).await.unwrap().unwrap();
    assert!(stored.onboarded);
}

#[tokio::test]
async fn test_onboarding_falls_back_when_insights_fail() {
    let store = Arc::new(MemoryStore::new());
    let app = AppState::new(
        store.clone(),
        Arc::new(FixedClock(date(2026, 10, 12))),
        Arc::new(FailingInsights),
        RewardPolicy::default(),
    );
    sign_in(&app, ACCOUNT, None).await.unwrap();

    let user = complete_onboarding(&app, answers()).await.unwrap();

    assert_eq!(user.smart_insights.as_deref(), Some(FALLBACK_INSIGHT));
    assert!(user.onboarded);
    assert_eq!(app.view().await, View::Pathway);
}

#[tokio::test]
async fn test_same_day_completion_keeps_streak() {
    let store = Arc::new(MemoryStore::new());
    let app = onboarded_app(&store, date(2026, 10, 12)).await;

    let done = complete_lesson(&app, "what-is-ai", None, 45).await.unwrap();

    assert_eq!(done.rewards.xp_gained, 20);
    assert_eq!(done.rewards.coins_gained, 10);
    assert_eq!(done.rewards.streak_change, StreakChange::Unchanged);
    assert_eq!(done.rewards.streak_delta, 0);
    assert_eq!(done.rewards.current_streak, 1);
    assert_eq!(done.coins, 110);
    assert_eq!(done.xp_total, 20);
    assert!(done.first_completion);
    assert_eq!(app.view().await, View::Pathway);

    let stored = store.get_user_by_account(ACCOUNT).await.unwrap().unwrap();
    assert_eq!(stored.coins, Some(110));
    assert_eq!(store.get_progress(ACCOUNT).await.unwrap(), vec!["what-is-ai"]);
}

#[tokio::test]
async fn test_wrong_answers_earn_base_xp_only() {
    let store = Arc::new(MemoryStore::new());
    let app = onboarded_app(&store, date(2026, 10, 12)).await;

    let done = complete_lesson(&app, "what-is-ai", Some(vec![0]), 30).await.unwrap();

    assert_eq!(done.result.correct_count, 0);
    assert_eq!(done.rewards.xp_gained, 10);
    assert_eq!(done.rewards.coins_gained, 10);
}

#[tokio::test]
async fn test_too_many_answers_is_rejected() {
    let store = Arc::new(MemoryStore::new());
    let app = onboarded_app(&store, date(2026, 10, 12)).await;

    let err = complete_lesson(&app, "what-is-ai", Some(vec![1, 1]), 30)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::InvalidLessonResult(_)));

    let stored = store.get_user_by_account(ACCOUNT).await.unwrap().unwrap();
    assert_eq!(stored.coins, Some(100));
    assert!(store.get_progress(ACCOUNT).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_unknown_lesson() {
    let store = Arc::new(MemoryStore::new());
    let app = onboarded_app(&store, date(2026, 10, 12)).await;

    let err = complete_lesson(&app, "quantum-ai", None, 30).await.unwrap_err();
    assert!(matches!(err, Error::LessonNotFound(id) if id == "quantum-ai"));
}

#[tokio::test]
async fn test_consecutive_days_extend_streak() {
    let store = Arc::new(MemoryStore::new());
    let monday = onboarded_app(&store, date(2026, 10, 12)).await;
    complete_lesson(&monday, "what-is-ai", None, 45).await.unwrap();

    let tuesday = reopen(&store, date(2026, 10, 13)).await;
    let done = complete_lesson(&tuesday, "neural-nets", None, 45).await.unwrap();

    assert_eq!(done.rewards.streak_change, StreakChange::Extended);
    assert_eq!(done.rewards.streak_delta, 1);
    assert_eq!(done.rewards.current_streak, 2);
    assert_eq!(done.xp_total, 40);
    assert_eq!(done.coins, 120);

    let user = tuesday.session().await.unwrap().user;
    let streak = user.streak_state.unwrap();
    assert_eq!(streak.longest_streak, 2);
    assert_eq!(streak.last_active_date, "2026-10-13");
    assert_eq!(user.league.unwrap().weekly_xp, 40);
}

#[tokio::test]
async fn test_missed_days_reset_streak() {
    let store = Arc::new(MemoryStore::new());
    let monday = onboarded_app(&store, date(2026, 10, 12)).await;
    complete_lesson(&monday, "what-is-ai", None, 45).await.unwrap();
    let tuesday = reopen(&store, date(2026, 10, 13)).await;
    complete_lesson(&tuesday, "neural-nets", None, 45).await.unwrap();

    let friday = reopen(&store, date(2026, 10, 16)).await;
    let done = complete_lesson(&friday, "llm-basics", None, 45).await.unwrap();

    assert_eq!(done.rewards.streak_change, StreakChange::Reset);
    assert_eq!(done.rewards.streak_delta, -1);
    assert_eq!(done.rewards.current_streak, 1);
    let streak = friday.session().await.unwrap().user.streak_state.unwrap();
    assert_eq!(streak.longest_streak, 2);
}

#[tokio::test]
async fn test_freeze_bridges_missed_days() {
    let store = Arc::new(MemoryStore::new());
    let monday = onboarded_app(&store, date(2026, 10, 12)).await;
    complete_lesson(&monday, "what-is-ai", None, 45).await.unwrap();
    let tuesday = reopen(&store, date(2026, 10, 13)).await;
    complete_lesson(&tuesday, "neural-nets", None, 45).await.unwrap();
    let granted = grant_streak_freeze(&tuesday, 1).await.unwrap();
    assert_eq!(granted.streak_freeze_count, 1);

    let friday = reopen(&store, date(2026, 10, 16)).await;
    let done = complete_lesson(&friday, "llm-basics", None, 45).await.unwrap();

    assert_eq!(done.rewards.streak_change, StreakChange::FreezeUsed);
    assert_eq!(done.rewards.streak_delta, 1);
    assert_eq!(done.rewards.current_streak, 3);
    let streak = friday.session().await.unwrap().user.streak_state.unwrap();
    assert_eq!(streak.streak_freeze_count, 0);
}

#[tokio::test]
async fn test_new_week_resets_weekly_xp_on_load() {
    let store = Arc::new(MemoryStore::new());
    let app = onboarded_app(&store, date(2026, 10, 12)).await;
    complete_lesson(&app, "what-is-ai", None, 45).await.unwrap();

    let next_week = reopen(&store, date(2026, 10, 19)).await;
    let report = status(&next_week).await.unwrap();

    assert_eq!(report.xp_this_week, 0);
    assert_eq!(report.xp_total, 20);
    let league = report.league.unwrap();
    assert_eq!(league.weekly_xp, 0);
    assert_eq!(league.week_start_date, "2026-10-19");
}

#[tokio::test]
async fn test_repeat_completion_still_rewards() {
    let store = Arc::new(MemoryStore::new());
    let app = onboarded_app(&store, date(2026, 10, 12)).await;
    complete_lesson(&app, "what-is-ai", None, 45).await.unwrap();

    let again = complete_lesson(&app, "what-is-ai", None, 20).await.unwrap();

    assert!(!again.first_completion);
    assert_eq!(again.xp_total, 40);
    assert_eq!(store.get_progress(ACCOUNT).await.unwrap(), vec!["what-is-ai"]);
}

#[tokio::test]
async fn test_list_courses_marks_completed() {
    let store = Arc::new(MemoryStore::new());
    let app = onboarded_app(&store, date(2026, 10, 12)).await;
    complete_lesson(&app, "bias-check", None, 45).await.unwrap();

    let courses = list_courses(&app).await;
    let completed: Vec<&str> = courses
        .iter()
        .flat_map(|c| c.lessons.iter())
        .filter(|l| l.completed)
        .map(|l| l.id.as_str())
        .collect();

    assert_eq!(courses.len(), 3);
    assert_eq!(completed, vec!["bias-check"]);
}

#[tokio::test]
async fn test_logout_keeps_profile() {
    let store = Arc::new(MemoryStore::new());
    let app = onboarded_app(&store, date(2026, 10, 12)).await;
    complete_lesson(&app, "what-is-ai", None, 45).await.unwrap();

    logout(&app).await.unwrap();

    assert!(app.session().await.is_none());
    assert_eq!(app.view().await, View::Landing);
    assert!(store.get_active_account().await.unwrap().is_none());
    assert!(restore(&app_on(&store, date(2026, 10, 12))).await.unwrap().is_none());

    let again = sign_in(&app, ACCOUNT, None).await.unwrap();
    assert!(!again.created);
    assert_eq!(again.view, View::Pathway);
    assert_eq!(again.session.user.coins, Some(110));
    assert_eq!(again.session.completed_lessons, vec!["what-is-ai"]);
}

#[tokio::test]
async fn test_restore_clears_dangling_account() {
    let store = Arc::new(MemoryStore::new());
    store.set_active_account("ghost@example.com").await.unwrap();

    let app = app_on(&store, date(2026, 10, 12));

    assert!(restore(&app).await.unwrap().is_none());
    assert!(store.get_active_account().await.unwrap().is_none());
    assert_eq!(app.view().await, View::Landing);
}

#[tokio::test]
async fn test_restore_hydrates_legacy_profile() {
    let store = Arc::new(MemoryStore::new());
    let mut legacy = UserProfile::for_account(ACCOUNT);
    legacy.onboarded = true;
    legacy.streak = Some(4);
    store.save_user(&legacy).await.unwrap();
    store.set_active_account(ACCOUNT).await.unwrap();

    let app = app_on(&store, date(2026, 10, 12));
    let session = restore(&app).await.unwrap().unwrap();

    assert_eq!(session.user.coins, Some(100));
    assert_eq!(session.user.current_streak(), 4);
    assert!(session.user.league.is_some());
    assert_eq!(app.view().await, View::Pathway);

    let stored = store.get_user_by_account(ACCOUNT).await.unwrap().unwrap();
    assert_eq!(stored.coins, Some(100));
}

#[tokio::test]
async fn test_settings_update_persists() {
    let store = Arc::new(MemoryStore::new());
    let app = onboarded_app(&store, date(2026, 10, 12)).await;

    let user = update_settings(
        &app,
        SettingsUpdate {
            theme: Some(LessonTheme::Academic),
            language: Some(smarty_core::Language::Vi),
        },
    )
    .await
    .unwrap();
    assert_eq!(user.theme, LessonTheme::Academic);

    let stored = store.get_user_by_account(ACCOUNT).await.unwrap().unwrap();
    assert_eq!(stored.theme, LessonTheme::Academic);
    assert_eq!(stored.language, Some(smarty_core::Language::Vi));
    assert_eq!(stored.name, "Linh");
}

#[tokio::test]
async fn test_status_report() {
    let store = Arc::new(MemoryStore::new());
    let app = onboarded_app(&store, date(2026, 10, 12)).await;
    complete_lesson(&app, "what-is-ai", None, 45).await.unwrap();

    let report = status(&app).await.unwrap();

    assert_eq!(report.account, ACCOUNT);
    assert!(report.onboarded);
    assert_eq!(report.coins, 110);
    assert_eq!(report.completed_lessons, 1);
    assert_eq!(report.total_lessons, 4);
    assert_eq!(report.global_student_count, 1);
    assert_eq!(report.view, View::Pathway);
}

#[tokio::test]
async fn test_failed_profile_save_records_nothing() {
    let store = Arc::new(FlakyStore::default());
    let app = flaky_app(&store);
    sign_in(&app, ACCOUNT, None).await.unwrap();
    complete_onboarding(&app, answers()).await.unwrap();

    store.fail_user_writes.store(true, Ordering::SeqCst);
    let err = complete_lesson(&app, "what-is-ai", None, 45).await.unwrap_err();
    assert!(matches!(err, Error::DatabaseError(_)));

    assert!(store.get_progress(ACCOUNT).await.unwrap().is_empty());
    let session = app.session().await.unwrap();
    assert!(session.completed_lessons.is_empty());
    assert_eq!(session.user.coins, Some(100));

    store.fail_user_writes.store(false, Ordering::SeqCst);
    app.navigate(ViewEvent::Back).await;
    let done = complete_lesson(&app, "what-is-ai", None, 45).await.unwrap();
    assert!(done.first_completion);
    assert_eq!(done.coins, 110);
}

#[tokio::test]
async fn test_failed_onboarding_save_returns_to_quiz() {
    let store = Arc::new(FlakyStore::default());
    let app = flaky_app(&store);
    sign_in(&app, ACCOUNT, None).await.unwrap();

    store.fail_user_writes.store(true, Ordering::SeqCst);
    let err = complete_onboarding(&app, answers()).await.unwrap_err();
    assert!(matches!(err, Error::DatabaseError(_)));
    assert_eq!(app.view().await, View::Onboarding);
    assert!(!app.session().await.unwrap().user.onboarded);

    store.fail_user_writes.store(false, Ordering::SeqCst);
    complete_onboarding(&app, answers()).await.unwrap();
    assert_eq!(app.view().await, View::Pathway);
}

#[tokio::test]
async fn test_perfect_flag_on_completion() {
    let store = Arc::new(MemoryStore::new());
    let app = onboarded_app(&store, date(2026, 10, 12)).await;

    assert!(complete_lesson(&app, "what-is-ai", None, 45).await.unwrap().perfect);
    assert!(!complete_lesson(&app, "neural-nets", Some(vec![3]), 45).await.unwrap().perfect);
}
