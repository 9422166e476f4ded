//! Screen navigation as a single transition table

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum View {
    #[default]
    Landing,
    Auth,
    Onboarding,
    /// Waiting for the learning-path insights after onboarding
    Generating,
    Pathway,
    Lesson,
    Chatbot,
    Calendar,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewEvent {
    OpenAuth,
    /// Sign-in or session restore finished
    SignedIn { onboarded: bool },
    OnboardingSubmitted,
    InsightsReady,
    /// Saving the onboarded profile failed; back to the quiz
    OnboardingFailed,
    OpenLesson,
    LessonCompleted,
    OpenChat,
    OpenCalendar,
    Back,
    LoggedOut,
}

impl View {
    /// Next view for `event`, or `None` if the event is not valid here
    pub fn next(self, event: ViewEvent) -> Option<View> {
        use View::*;
        use ViewEvent::*;

        let next = match (self, event) {
            (Landing, OpenAuth) => Auth,
            (Landing | Auth, SignedIn { onboarded: true }) => Pathway,
            (Landing | Auth, SignedIn { onboarded: false }) => Onboarding,
            (Auth, Back) => Landing,
            (Onboarding, OnboardingSubmitted) => Generating,
            (Generating, InsightsReady) => Pathway,
            (Generating, OnboardingFailed) => Onboarding,
            (Pathway, OpenLesson) => Lesson,
            (Lesson, LessonCompleted) => Pathway,
            (Pathway, OpenChat) => Chatbot,
            (Pathway, OpenCalendar) => Calendar,
            (Lesson | Chatbot | Calendar, Back) => Pathway,
            (Landing | Auth, LoggedOut) => return None,
            (_, LoggedOut) => Landing,
            _ => return None,
        };

        Some(next)
    }
}
