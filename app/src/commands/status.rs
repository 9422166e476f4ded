//! Dashboard summary of the signed-in profile

use crate::state::AppState;
use crate::view::View;
use serde::Serialize;
use smarty_core::{catalog, LeagueState, Result, StreakState};
use smarty_engine::Progression;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusReport {
    pub account: String,
    pub name: String,
    pub onboarded: bool,
    pub view: View,
    pub coins: u32,
    pub xp_total: u64,
    pub xp_this_week: u64,
    pub streak: StreakState,
    pub league: Option<LeagueState>,
    pub completed_lessons: usize,
    pub total_lessons: usize,
    pub smart_insights: Option<String>,
    pub global_student_count: u64,
}

pub async fn status(state: &AppState) -> Result<StatusReport> {
    let session = state.require_session().await?;
    let progression = Progression::hydrate(&session.user, state.today());

    Ok(StatusReport {
        account: session.account,
        name: session.user.name,
        onboarded: session.user.onboarded,
        view: state.view().await,
        coins: progression.coins,
        xp_total: progression.xp_total,
        xp_this_week: progression.xp_this_week,
        streak: progression.streak,
        league: session.user.league,
        completed_lessons: session.completed_lessons.len(),
        total_lessons: catalog::lesson_count(),
        smart_insights: session.user.smart_insights,
        global_student_count: state.store.get_global_student_count().await?,
    })
}
