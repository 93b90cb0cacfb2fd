//! In-memory asset registry.

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use atrium_core::error::{StorageError, StorageResult};
use atrium_core::models::{AssetKind, AssetSnapshot, RegisteredAsset};
use atrium_core::ports::AssetRegistry;

#[derive(Debug, Default)]
struct Collection {
    assets: Vec<RegisteredAsset>,
    default_version: Option<String>,
}

impl Collection {
    fn position(&self, handle: &str) -> Option<usize> {
        self.assets.iter().position(|a| a.handle == handle)
    }
}

/// Ordered script and stylesheet registrations held in memory.
///
/// Registration order is the collection order exposed to pagination.
/// Readers get a cloned [`AssetSnapshot`], so a request never observes
/// a registration made while it is being resolved.
#[derive(Debug, Default)]
pub struct MemoryAssetRegistry {
    scripts: RwLock<Collection>,
    stylesheets: RwLock<Collection>,
}

impl MemoryAssetRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    fn collection(&self, kind: AssetKind) -> &RwLock<Collection> {
        match kind {
            AssetKind::Script => &self.scripts,
            AssetKind::Stylesheet => &self.stylesheets,
        }
    }

    /// Append an asset. An existing handle is left untouched.
    pub async fn register(&self, kind: AssetKind, asset: RegisteredAsset) -> StorageResult<()> {
        let mut collection = self.collection(kind).write().await;
        if collection.position(&asset.handle).is_some() {
            return Err(StorageError::AlreadyRegistered(format!(
                "{kind} {}",
                asset.handle
            )));
        }
        debug!(%kind, handle = %asset.handle, "Registered asset");
        collection.assets.push(asset);
        Ok(())
    }

    /// Remove an asset, returning it.
    pub async fn deregister(&self, kind: AssetKind, handle: &str) -> StorageResult<RegisteredAsset> {
        let mut collection = self.collection(kind).write().await;
        let index = collection
            .position(handle)
            .ok_or_else(|| StorageError::NotFound(format!("{kind} {handle}")))?;
        debug!(%kind, handle, "Deregistered asset");
        Ok(collection.assets.remove(index))
    }

    /// Set an `extra` entry on a registered asset (e.g. inline `data`).
    pub async fn add_data(
        &self,
        kind: AssetKind,
        handle: &str,
        key: &str,
        value: serde_json::Value,
    ) -> StorageResult<()> {
        let mut collection = self.collection(kind).write().await;
        let index = collection
            .position(handle)
            .ok_or_else(|| StorageError::NotFound(format!("{kind} {handle}")))?;
        collection.assets[index].extra.insert(key.to_string(), value);
        Ok(())
    }

    /// Set the version reported for assets registered without one.
    pub async fn set_default_version(&self, kind: AssetKind, version: Option<String>) {
        self.collection(kind).write().await.default_version = version;
    }

    /// Number of registered assets of a kind.
    pub async fn len(&self, kind: AssetKind) -> usize {
        self.collection(kind).read().await.assets.len()
    }

    pub async fn is_empty(&self, kind: AssetKind) -> bool {
        self.len(kind).await == 0
    }
}

#[async_trait]
impl AssetRegistry for MemoryAssetRegistry {
    async fn snapshot(&self, kind: AssetKind) -> StorageResult<AssetSnapshot> {
        let collection = self.collection(kind).read().await;
        Ok(AssetSnapshot {
            assets: collection.assets.clone(),
            default_version: collection.default_version.clone(),
        })
    }
}
