//! In-memory profile store for tests and throwaway sessions

use crate::store::ProfileStore;
use async_trait::async_trait;
use smarty_core::{Error, Result, UserProfile};
use std::collections::HashMap;
use std::sync::RwLock;

#[derive(Default)]
struct Inner {
    users: HashMap<String, UserProfile>,
    progress: HashMap<String, Vec<String>>,
    active_account: Option<String>,
}

/// Thread-safe store that lives only as long as the process
#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<std::sync::RwLockReadGuard<'_, Inner>> {
        self.inner
            .read()
            .map_err(|_| Error::DatabaseError("memory store lock poisoned".to_string()))
    }

    fn write(&self) -> Result<std::sync::RwLockWriteGuard<'_, Inner>> {
        self.inner
            .write()
            .map_err(|_| Error::DatabaseError("memory store lock poisoned".to_string()))
    }

    /// Number of stored profiles
    pub fn len(&self) -> usize {
        self.inner.read().map(|i| i.users.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl ProfileStore for MemoryStore {
    async fn get_user_by_account(&self, account: &str) -> Result<Option<UserProfile>> {
        Ok(self.read()?.users.get(account).cloned())
    }

    async fn save_user(&self, user: &UserProfile) -> Result<()> {
        if user.email.trim().is_empty() {
            return Err(Error::InvalidData("profile has no account email".to_string()));
        }
        self.write()?.users.insert(user.email.clone(), user.clone());
        Ok(())
    }

    async fn get_progress(&self, account: &str) -> Result<Vec<String>> {
        Ok(self.read()?.progress.get(account).cloned().unwrap_or_default())
    }

    async fn save_progress(&self, account: &str, lessons: &[String]) -> Result<()> {
        self.write()?
            .progress
            .insert(account.to_string(), lessons.to_vec());
        Ok(())
    }

    async fn get_active_account(&self) -> Result<Option<String>> {
        Ok(self.read()?.active_account.clone())
    }

    async fn set_active_account(&self, account: &str) -> Result<()> {
        self.write()?.active_account = Some(account.to_string());
        Ok(())
    }

    async fn logout(&self) -> Result<()> {
        self.write()?.active_account = None;
        Ok(())
    }

    async fn get_global_student_count(&self) -> Result<u64> {
        Ok(self.read()?.users.len() as u64)
    }
}
