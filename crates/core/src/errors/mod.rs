//! Error types and Result alias for Smarty

use thiserror::Error;

/// Main error type for Smarty
#[derive(Error, Debug)]
pub enum Error {
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("Invalid lesson result: {0}")]
    InvalidLessonResult(String),

    #[error("No active account")]
    NoActiveAccount,

    #[error("Onboarding not completed for {0}")]
    NotOnboarded(String),

    #[error("Lesson not found: {0}")]
    LessonNotFound(String),

    #[error("Insight generation failed: {0}")]
    InsightError(String),
}

/// Result type alias using our Error
pub type Result<T> = std::result::Result<T, Error>;

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::InvalidData(err.to_string())
    }
}
