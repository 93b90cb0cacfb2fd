//! In-memory storage adapter.
//!
//! This module implements the registry traits defined in `atrium-core`
//! with process-local collections behind `tokio::sync::RwLock`.
//!
//! # Architecture
//!
//! - [`MemoryStore`] - Shared handles on both registries
//! - [`MemoryAssetRegistry`] - Script and stylesheet registrations
//! - [`MemoryUserRepository`] - Users
//! - [`Manifest`] - JSON seed data
//!
//! # Usage
//!
//! ```ignore
//! let store = MemoryStore::from_manifest_path("atrium.json").await?;
//! let schema = build_schema(store.assets(), store.users(), avatars, config);
//! ```

mod asset_registry;
mod manifest;
mod user_repo;

pub use asset_registry::MemoryAssetRegistry;
pub use manifest::{CollectionManifest, Manifest, ManifestStats};
pub use user_repo::MemoryUserRepository;

use std::path::Path;
use std::sync::Arc;

use tracing::info;

use atrium_core::error::StorageResult;

// =============================================================================
// Composite Store
// =============================================================================

/// Both in-memory registries, shared behind `Arc`.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    assets: Arc<MemoryAssetRegistry>,
    users: Arc<MemoryUserRepository>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store seeded from a manifest.
    pub async fn from_manifest(manifest: Manifest) -> StorageResult<Self> {
        let store = Self::new();
        let stats = manifest.load_into(&store.assets, &store.users).await?;
        info!(
            scripts = stats.scripts,
            stylesheets = stats.stylesheets,
            users = stats.users,
            "📦 Manifest loaded"
        );
        Ok(store)
    }

    /// Build a store seeded from a manifest file.
    pub async fn from_manifest_path(path: impl AsRef<Path>) -> StorageResult<Self> {
        Self::from_manifest(Manifest::from_path(path).await?).await
    }

    pub fn assets(&self) -> Arc<MemoryAssetRegistry> {
        self.assets.clone()
    }

    pub fn users(&self) -> Arc<MemoryUserRepository> {
        self.users.clone()
    }
}
