//! SQLite database management

mod connection;
mod profiles;
mod progress;
mod settings;

pub use connection::Database;
pub use profiles::*;
pub use progress::*;
pub use settings::*;

use crate::store::ProfileStore;
use async_trait::async_trait;
use smarty_core::{Result, UserProfile};
use tracing::{debug, info};

#[async_trait]
impl ProfileStore for Database {
    async fn get_user_by_account(&self, account: &str) -> Result<Option<UserProfile>> {
        profiles::get_user(self.pool(), account).await
    }

    async fn save_user(&self, user: &UserProfile) -> Result<()> {
        profiles::save_user(self.pool(), user).await?;
        debug!(account = %user.email, "Profile saved");
        Ok(())
    }

    async fn get_progress(&self, account: &str) -> Result<Vec<String>> {
        progress::get_progress(self.pool(), account).await
    }

    async fn save_progress(&self, account: &str, lessons: &[String]) -> Result<()> {
        progress::save_progress(self.pool(), account, lessons).await
    }

    async fn get_active_account(&self) -> Result<Option<String>> {
        settings::get_setting(self.pool(), ACTIVE_ACCOUNT_KEY).await
    }

    async fn set_active_account(&self, account: &str) -> Result<()> {
        settings::set_setting(self.pool(), ACTIVE_ACCOUNT_KEY, account).await
    }

    async fn logout(&self) -> Result<()> {
        settings::delete_setting(self.pool(), ACTIVE_ACCOUNT_KEY).await?;
        info!("Active account cleared");
        Ok(())
    }

    async fn get_global_student_count(&self) -> Result<u64> {
        profiles::count_users(self.pool()).await
    }
}
