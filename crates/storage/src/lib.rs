//! Storage layer for Atrium.
//!
//! This crate provides in-memory implementations of the registry traits
//! defined in `atrium-core`: the ordered script/stylesheet registry and
//! the user directory, plus the JSON manifest used to seed them.
//!
//! # Usage
//!
//! ```ignore
//! use atrium_storage::MemoryStore;
//!
//! let store = MemoryStore::from_manifest_path("atrium.json").await?;
//! store.assets().register(AssetKind::Script, asset).await?;
//! ```

pub mod memory;

pub use memory::{
    Manifest, ManifestStats, MemoryAssetRegistry, MemoryStore, MemoryUserRepository,
};
