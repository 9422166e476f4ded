//! Storage collaborator interface
//!
//! Everything the application persists is keyed by account identifier (the
//! profile's email). One account at a time is "active"; that pointer is what
//! a restart restores and what logout clears.

use async_trait::async_trait;
use smarty_core::{Result, UserProfile};

#[async_trait]
pub trait ProfileStore: Send + Sync {
    /// Load the stored profile for an account
    async fn get_user_by_account(&self, account: &str) -> Result<Option<UserProfile>>;

    /// Insert or replace a profile, keyed by its `email`
    async fn save_user(&self, user: &UserProfile) -> Result<()>;

    /// Ids of completed lessons for an account (empty if none)
    async fn get_progress(&self, account: &str) -> Result<Vec<String>>;

    /// Replace the completed lesson ids for an account
    async fn save_progress(&self, account: &str, lessons: &[String]) -> Result<()>;

    /// Account restored on the next start, if any
    async fn get_active_account(&self) -> Result<Option<String>>;

    async fn set_active_account(&self, account: &str) -> Result<()>;

    /// Forget the active account. Profiles and progress are kept.
    async fn logout(&self) -> Result<()>;

    /// Number of accounts that ever signed up on this store
    async fn get_global_student_count(&self) -> Result<u64>;
}
