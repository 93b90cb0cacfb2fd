//! In-memory user directory.

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use atrium_core::error::{StorageError, StorageResult};
use atrium_core::models::User;
use atrium_core::ports::UserRepository;

/// Users keyed by database id.
#[derive(Debug, Default)]
pub struct MemoryUserRepository {
    users: RwLock<BTreeMap<u64, User>>,
}

impl MemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a user. Ids are unique.
    pub async fn insert(&self, user: User) -> StorageResult<()> {
        let mut users = self.users.write().await;
        if users.contains_key(&user.id) {
            return Err(StorageError::AlreadyRegistered(format!("user {}", user.id)));
        }
        users.insert(user.id, user);
        Ok(())
    }

    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl UserRepository for MemoryUserRepository {
    async fn get_user(&self, id: u64) -> StorageResult<Option<User>> {
        Ok(self.users.read().await.get(&id).cloned())
    }
}
