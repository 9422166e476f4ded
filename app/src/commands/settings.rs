//! Profile settings and inventory edits

use crate::state::AppState;
use serde::{Deserialize, Serialize};
use smarty_core::{Language, LessonTheme, Result, StreakState, UserProfile};
use smarty_engine::{streak, Progression};
use tracing::info;

/// Partial settings update; `None` fields are left alone
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsUpdate {
    pub theme: Option<LessonTheme>,
    pub language: Option<Language>,
}

/// Change theme and/or language of the signed-in profile
pub async fn update_settings(state: &AppState, update: SettingsUpdate) -> Result<UserProfile> {
    let mut user = state.require_session().await?.user;

    if let Some(theme) = update.theme {
        user.theme = theme;
    }
    if let Some(language) = update.language {
        user.language = Some(language);
    }

    state.commit_user(user.clone()).await?;
    Ok(user)
}

/// Add streak freezes to the signed-in profile's inventory
pub async fn grant_streak_freeze(state: &AppState, count: u32) -> Result<StreakState> {
    let mut user = state.require_session().await?.user;

    let mut progression = Progression::hydrate(&user, state.today());
    streak::grant_freeze(&mut progression.streak, count);
    progression.write_to(&mut user);

    let streak_state = progression.streak.clone();
    state.commit_user(user).await?;

    info!(
        granted = count,
        available = streak_state.streak_freeze_count,
        "Streak freezes granted"
    );
    Ok(streak_state)
}
