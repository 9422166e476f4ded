//! Course listing and lesson completion

use crate::state::AppState;
use crate::view::ViewEvent;
use serde::Serialize;
use smarty_core::{catalog, Error, LessonResult, Result, RewardOutcome};
use smarty_engine::apply_lesson_rewards_with;
use tracing::info;

/// One course with per-lesson completion flags
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseProgress {
    pub id: String,
    pub title: String,
    pub icon: String,
    pub color: String,
    pub lessons: Vec<LessonProgress>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LessonProgress {
    pub id: String,
    pub title: String,
    pub duration: String,
    pub questions: usize,
    pub completed: bool,
}

/// What the reward modal needs after a lesson
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LessonCompletion {
    pub lesson_id: String,
    pub result: LessonResult,
    pub rewards: RewardOutcome,
    pub coins: u32,
    pub xp_total: u64,
    /// Every quiz question answered correctly
    pub perfect: bool,
    /// `false` when the lesson had been completed before
    pub first_completion: bool,
}

/// Catalog with completion state for the signed-in account
pub async fn list_courses(state: &AppState) -> Vec<CourseProgress> {
    let session = state.session().await;

    catalog::courses()
        .into_iter()
        .map(|course| CourseProgress {
            lessons: course
                .lessons
                .iter()
                .map(|lesson| LessonProgress {
                    id: lesson.id.clone(),
                    title: lesson.title.clone(),
                    duration: lesson.duration.clone(),
                    questions: lesson.quiz.len(),
                    completed: session
                        .as_ref()
                        .map(|s| s.is_completed(&lesson.id))
                        .unwrap_or(false),
                })
                .collect(),
            id: course.id,
            title: course.title,
            icon: course.icon,
            color: course.color,
        })
        .collect()
}

/// Finish a lesson quiz: grade it, record progress, apply rewards, persist.
///
/// `answers` of `None` means the quiz was answered correctly throughout,
/// which is how the lesson viewer reports a finished quiz (a wrong pick has
/// to be retried before moving on).
pub async fn complete_lesson(
    state: &AppState,
    lesson_id: &str,
    answers: Option<Vec<usize>>,
    duration_seconds: u32,
) -> Result<LessonCompletion> {
    let mut session = state.require_session().await?;
    if !session.user.onboarded {
        return Err(Error::NotOnboarded(session.account));
    }

    let lesson =
        catalog::find_lesson(lesson_id).ok_or_else(|| Error::LessonNotFound(lesson_id.to_string()))?;
    let answers = answers.unwrap_or_else(|| lesson.perfect_answers());
    let result = lesson.grade(&answers, duration_seconds)?;
    state.navigate(ViewEvent::OpenLesson).await;

    let outcome = apply_lesson_rewards_with(&state.policy, &session.user, &result, state.today());
    state.store.save_user(&outcome.user).await?;

    let first_completion = session.mark_completed(&lesson.id);
    if first_completion {
        state
            .store
            .save_progress(&session.account, &session.completed_lessons)
            .await?;
    }
    session.user = outcome.user;

    let completion = LessonCompletion {
        lesson_id: lesson.id,
        result,
        rewards: outcome.rewards,
        coins: session.user.coins.unwrap_or(0),
        xp_total: session.user.xp_total.unwrap_or(0),
        perfect: result.accuracy().is_perfect(),
        first_completion,
    };

    state.set_session(session).await;
    state.navigate(ViewEvent::LessonCompleted).await;

    info!(
        lesson = %completion.lesson_id,
        correct = result.correct_count,
        total = result.total_questions.get(),
        xp = completion.rewards.xp_gained,
        coins = completion.rewards.coins_gained,
        streak = completion.rewards.current_streak,
        "Lesson completed"
    );

    Ok(completion)
}
