//! Port traits for the asset registry and the user directory.
//!
//! These traits define the read interface used by the resolvers.
//! Implementations live in the infrastructure layer (e.g., `atrium-storage`).

use async_trait::async_trait;

use crate::error::StorageResult;
use crate::models::{AssetKind, AssetSnapshot, User};

/// Source of registered script and stylesheet handles.
#[async_trait]
pub trait AssetRegistry: Send + Sync {
    /// Take a read-only snapshot of one collection, in registration order.
    async fn snapshot(&self, kind: AssetKind) -> StorageResult<AssetSnapshot>;
}

/// Lookup of platform users.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Get a user by database id.
    async fn get_user(&self, id: u64) -> StorageResult<Option<User>>;
}
