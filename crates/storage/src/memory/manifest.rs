//! JSON manifest used to seed the in-memory registries.
//!
//! ```json
//! {
//!   "scripts": {
//!     "default_version": "6.4.2",
//!     "assets": [
//!       { "handle": "jquery-core", "src": "/wp-includes/js/jquery/jquery.min.js", "ver": "3.7.1" },
//!       { "handle": "jquery", "deps": ["jquery-core"] }
//!     ]
//!   },
//!   "stylesheets": { "assets": [ { "handle": "dashicons", "src": "/dashicons.css" } ] },
//!   "users": [ { "id": 1, "email": "admin@example.com", "display_name": "admin" } ]
//! }
//! ```

use std::path::Path;

use serde::Deserialize;
use tracing::{debug, instrument};

use atrium_core::error::StorageResult;
use atrium_core::models::{AssetKind, RegisteredAsset, User};

use super::{MemoryAssetRegistry, MemoryUserRepository};

/// One asset collection in the manifest.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CollectionManifest {
    #[serde(default)]
    pub default_version: Option<String>,
    #[serde(default)]
    pub assets: Vec<RegisteredAsset>,
}

/// Seed data for the registries.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Manifest {
    #[serde(default)]
    pub scripts: CollectionManifest,
    #[serde(default)]
    pub stylesheets: CollectionManifest,
    #[serde(default)]
    pub users: Vec<User>,
}

/// Counts of what a manifest loaded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ManifestStats {
    pub scripts: usize,
    pub stylesheets: usize,
    pub users: usize,
}

impl Manifest {
    /// Parse a manifest from JSON text.
    pub fn parse(json: &str) -> StorageResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a manifest file.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub async fn from_path(path: impl AsRef<Path>) -> StorageResult<Self> {
        let text = tokio::fs::read_to_string(path.as_ref()).await?;
        debug!(bytes = text.len(), "Manifest read");
        Self::parse(&text)
    }

    /// Register everything into the given registries, in manifest order.
    ///
    /// Stops at the first duplicate handle or user id.
    pub async fn load_into(
        self,
        assets: &MemoryAssetRegistry,
        users: &MemoryUserRepository,
    ) -> StorageResult<ManifestStats> {
        let stats = ManifestStats {
            scripts: self.scripts.assets.len(),
            stylesheets: self.stylesheets.assets.len(),
            users: self.users.len(),
        };

        for (kind, collection) in [
            (AssetKind::Script, self.scripts),
            (AssetKind::Stylesheet, self.stylesheets),
        ] {
            assets
                .set_default_version(kind, collection.default_version)
                .await;
            for asset in collection.assets {
                assets.register(kind, asset).await?;
            }
        }

        for user in self.users {
            users.insert(user).await?;
        }

        Ok(stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use atrium_core::ports::{AssetRegistry, UserRepository};

    const MANIFEST: &str = r#"{
        "scripts": {
            "default_version": "6.4.2",
            "assets": [
                { "handle": "jquery-core", "src": "/jquery.min.js", "ver": "3.7.1" },
                { "handle": "jquery", "deps": ["jquery-core"], "extra": { "data": "var a = 1;" } }
            ]
        },
        "users": [ { "id": 7, "email": "admin@example.com", "display_name": "admin" } ]
    }"#;

    #[tokio::test]
    async fn test_manifest_loads_in_order() {
        let assets = MemoryAssetRegistry::new();
        let users = MemoryUserRepository::new();

        let stats = Manifest::parse(MANIFEST)
            .unwrap()
            .load_into(&assets, &users)
            .await
            .unwrap();
        assert_eq!(
            stats,
            ManifestStats {
                scripts: 2,
                stylesheets: 0,
                users: 1
            }
        );

        let scripts = assets.snapshot(AssetKind::Script).await.unwrap();
        assert_eq!(scripts.assets[0].handle, "jquery-core");
        assert_eq!(scripts.assets[1].dependencies, vec!["jquery-core"]);
        assert_eq!(scripts.default_version.as_deref(), Some("6.4.2"));
        assert!(users.get_user(7).await.unwrap().is_some());
    }

    // Test critique: un handle dupliqué dans le manifeste est une erreur
    #[tokio::test]
    async fn test_manifest_rejects_duplicates() {
        let manifest = Manifest::parse(
            r#"{ "stylesheets": { "assets": [ { "handle": "a" }, { "handle": "a" } ] } }"#,
        )
        .unwrap();
        let result = manifest
            .load_into(&MemoryAssetRegistry::new(), &MemoryUserRepository::new())
            .await;
        assert!(result.is_err());
    }

    #[test]
    fn test_manifest_rejects_invalid_json() {
        let err = Manifest::parse("{ not json").unwrap_err();
        assert!(err.to_string().contains("Serialization"));
    }
}
