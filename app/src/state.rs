//! Application state management
//!
//! One profile is signed in at a time. The session is populated from the
//! store at startup (or on sign-in), changed only through the command
//! handlers, and dropped on logout.

use crate::insights::InsightProvider;
use crate::view::{View, ViewEvent};
use chrono::NaiveDate;
use serde::Serialize;
use smarty_core::{Error, Result, UserProfile};
use smarty_engine::{Clock, RewardPolicy};
use smarty_persistence::ProfileStore;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

/// Signed-in profile and its completed lessons
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub account: String,
    pub user: UserProfile,
    /// Completed lesson ids in completion order, without duplicates
    pub completed_lessons: Vec<String>,
}

impl Session {
    pub fn new(user: UserProfile, completed_lessons: Vec<String>) -> Self {
        let mut unique = Vec::with_capacity(completed_lessons.len());
        for id in completed_lessons {
            if !unique.contains(&id) {
                unique.push(id);
            }
        }

        Self {
            account: user.email.clone(),
            user,
            completed_lessons: unique,
        }
    }

    /// Record a completed lesson. Returns `false` if it was already recorded.
    pub fn mark_completed(&mut self, lesson_id: &str) -> bool {
        if self.completed_lessons.iter().any(|id| id == lesson_id) {
            return false;
        }
        self.completed_lessons.push(lesson_id.to_string());
        true
    }

    pub fn is_completed(&self, lesson_id: &str) -> bool {
        self.completed_lessons.iter().any(|id| id == lesson_id)
    }
}

/// Global application state shared across command handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn ProfileStore>,
    pub clock: Arc<dyn Clock>,
    pub insights: Arc<dyn InsightProvider>,
    pub policy: RewardPolicy,
    session: Arc<RwLock<Option<Session>>>,
    view: Arc<RwLock<View>>,
}

impl AppState {
    /// Create new application state
    pub fn new(
        store: Arc<dyn ProfileStore>,
        clock: Arc<dyn Clock>,
        insights: Arc<dyn InsightProvider>,
        policy: RewardPolicy,
    ) -> Self {
        Self {
            store,
            clock,
            insights,
            policy,
            session: Arc::new(RwLock::new(None)),
            view: Arc::new(RwLock::new(View::default())),
        }
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    /// Snapshot of the signed-in session
    pub async fn session(&self) -> Option<Session> {
        self.session.read().await.clone()
    }

    /// Snapshot of the signed-in session, or `NoActiveAccount`
    pub async fn require_session(&self) -> Result<Session> {
        self.session().await.ok_or(Error::NoActiveAccount)
    }

    pub(crate) async fn set_session(&self, session: Session) {
        *self.session.write().await = Some(session);
    }

    pub(crate) async fn clear_session(&self) {
        *self.session.write().await = None;
    }

    /// Persist `user` and make it the session's profile
    pub(crate) async fn commit_user(&self, user: UserProfile) -> Result<()> {
        self.store.save_user(&user).await?;

        let mut guard = self.session.write().await;
        let session = guard.as_mut().ok_or(Error::NoActiveAccount)?;
        session.user = user;
        Ok(())
    }

    pub async fn view(&self) -> View {
        *self.view.read().await
    }

    /// Apply a navigation event. Invalid events leave the view unchanged.
    pub async fn navigate(&self, event: ViewEvent) -> View {
        let mut view = self.view.write().await;
        match view.next(event) {
            Some(next) => {
                debug!(from = ?*view, to = ?next, "View transition");
                *view = next;
            }
            None => debug!(view = ?*view, event = ?event, "Ignored view event"),
        }
        *view
    }
}
