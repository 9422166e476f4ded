//! Onboarding quiz submission

use crate::insights::FALLBACK_INSIGHT;
use crate::state::AppState;
use crate::view::ViewEvent;
use smarty_core::{OnboardingAnswers, Result, UserProfile};
use smarty_engine::hydrate_profile;
use tracing::{info, warn};

/// Merge the onboarding answers into the signed-in profile, attach the
/// learning-path insights, and persist.
pub async fn complete_onboarding(
    state: &AppState,
    answers: OnboardingAnswers,
) -> Result<UserProfile> {
    let session = state.require_session().await?;
    state.navigate(ViewEvent::OnboardingSubmitted).await;

    let mut user = session.user;
    if !answers.name.trim().is_empty() {
        user.name = answers.name.trim().to_string();
    }
    user.grade = answers.grade;
    user.level = answers.level;
    user.interests = answers.interests;
    user.theme = answers.theme;
    if answers.mentor_persona.is_some() {
        user.mentor_persona = answers.mentor_persona;
    }
    user.onboarded = true;

    let mut user = hydrate_profile(&user, state.today());

    let insights = match state.insights.generate_insights(&user).await {
        Ok(text) => text,
        Err(e) => {
            warn!(account = %user.email, error = %e, "Insight generation failed, using fallback");
            FALLBACK_INSIGHT.to_string()
        }
    };
    user.smart_insights = Some(insights);

    if let Err(e) = state.commit_user(user.clone()).await {
        state.navigate(ViewEvent::OnboardingFailed).await;
        return Err(e);
    }
    state.navigate(ViewEvent::InsightsReady).await;

    info!(account = %user.email, level = ?user.level, "Onboarding completed");
    Ok(user)
}
