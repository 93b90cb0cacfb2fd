//! Core domain layer for Atrium.
//!
//! This crate contains the domain models, port traits (interfaces), the
//! Relay codec and the services behind the GraphQL API: the connection
//! pager and avatar resolution. It is the innermost layer with no
//! dependencies on infrastructure.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      atrium (binary)                        │
//! ├─────────────────────────────────────────────────────────────┤
//! │        atrium-graphql          │       atrium-storage       │
//! │      (schema, server)          │   (in-memory registries)   │
//! ├────────────────────────────────┴────────────────────────────┤
//! │                     atrium-core  ← YOU ARE HERE             │
//! │            (models, ports, relay, services)                 │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`models`] - Domain models (RegisteredAsset, User, ...)
//! - [`ports`] - Interface traits and pagination types
//! - [`relay`] - Cursor and global ID encoding
//! - [`services`] - ConnectionPager, AvatarService
//! - [`error`] - Domain error types
//! - [`metrics`] - Prometheus metrics definitions
//!
//! # Key Concepts
//!
//! ## Ports
//!
//! - [`ports::AssetRegistry`] - Ordered script/stylesheet collections
//! - [`ports::UserRepository`] - User lookup
//! - [`ports::AvatarProvider`] - Avatar URL and metadata
//!
//! ## Pagination
//!
//! Connections are cut from a read-only snapshot of the whole collection
//! by [`services::ConnectionPager`]. Cursors name a record by key, and
//! `hasNextPage`/`hasPreviousPage` are relative to the whole collection.

pub mod error;
pub mod metrics;
pub mod models;
pub mod ports;
pub mod relay;
pub mod services;
