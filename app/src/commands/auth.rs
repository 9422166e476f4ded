//! Sign-in, session restore, and logout

use crate::state::{AppState, Session};
use crate::view::{View, ViewEvent};
use serde::Serialize;
use smarty_core::{Error, Language, Result, UserProfile};
use smarty_engine::{hydrate_profile, league, new_profile};
use tracing::{info, warn};

/// Result of signing in to an account
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignInResult {
    pub session: Session,
    /// `true` when the account was created by this sign-in
    pub created: bool,
    pub view: View,
}

/// Restore the account that was active when the app last ran.
///
/// Returns `None` if nobody is signed in. A dangling active-account pointer
/// is cleared.
pub async fn restore(state: &AppState) -> Result<Option<Session>> {
    let Some(account) = state.store.get_active_account().await? else {
        return Ok(None);
    };

    let Some(user) = state.store.get_user_by_account(&account).await? else {
        warn!(account = %account, "Active account has no stored profile, logging out");
        state.store.logout().await?;
        return Ok(None);
    };

    let user = refresh_profile(state, user).await?;
    let lessons = state.store.get_progress(&account).await?;
    let session = Session::new(user, lessons);

    state
        .navigate(ViewEvent::SignedIn {
            onboarded: session.user.onboarded,
        })
        .await;
    state.set_session(session.clone()).await;

    info!(account = %account, "Session restored");
    Ok(Some(session))
}

/// Sign in with an account identifier, creating the profile on first use
pub async fn sign_in(
    state: &AppState,
    account: &str,
    language: Option<Language>,
) -> Result<SignInResult> {
    let account = account.trim();
    if account.is_empty() {
        return Err(Error::InvalidData("account must not be empty".to_string()));
    }

    let (user, created) = match state.store.get_user_by_account(account).await? {
        Some(existing) => (refresh_profile(state, existing).await?, false),
        None => {
            let today = state.today();
            let mut user = new_profile(account, today, language);
            league::roll_league_week(&mut user, today);
            state.store.save_user(&user).await?;
            info!(account = %account, "New student profile created");
            (user, true)
        }
    };

    state.store.set_active_account(account).await?;
    let lessons = state.store.get_progress(account).await?;
    let session = Session::new(user, lessons);

    state.navigate(ViewEvent::OpenAuth).await;
    let view = state
        .navigate(ViewEvent::SignedIn {
            onboarded: session.user.onboarded,
        })
        .await;
    state.set_session(session.clone()).await;

    Ok(SignInResult {
        session,
        created,
        view,
    })
}

/// Sign out. Stored profile and progress are kept for the next sign-in.
pub async fn logout(state: &AppState) -> Result<()> {
    state.store.logout().await?;
    state.clear_session().await;
    state.navigate(ViewEvent::LoggedOut).await;
    Ok(())
}

pub async fn global_student_count(state: &AppState) -> Result<u64> {
    state.store.get_global_student_count().await
}

/// Hydrate a loaded profile and roll its league week; persist if anything
/// changed.
async fn refresh_profile(state: &AppState, stored: UserProfile) -> Result<UserProfile> {
    let today = state.today();
    let mut user = hydrate_profile(&stored, today);
    league::roll_league_week(&mut user, today);

    if user != stored {
        state.store.save_user(&user).await?;
    }
    Ok(user)
}
