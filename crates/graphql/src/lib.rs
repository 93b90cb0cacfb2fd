//! GraphQL API for Atrium.
//!
//! Exposes users with their avatar metadata and Relay connections over
//! the registered scripts and stylesheets.
//!
//! # Building the Schema
//!
//! ```ignore
//! use atrium_core::services::{AvatarService, GravatarProvider, PagerConfig};
//! use atrium_graphql::build_schema;
//!
//! let avatars = AvatarService::new(Arc::new(GravatarProvider::new(&config)?), "mm");
//! let schema = build_schema(store.assets(), store.users(), avatars, PagerConfig::default());
//! ```

mod assets;
mod schema;
mod server;
mod types;
mod users;

pub use assets::{
    EnqueuedScript, EnqueuedStylesheet, RegisteredScriptConnection, RegisteredScriptEdge,
    RegisteredStylesheetConnection, RegisteredStylesheetEdge,
};
pub use schema::{build_schema, PageInfo, Query, MAX_QUERY_COMPLEXITY, MAX_QUERY_DEPTH};
pub use server::{router, serve_with_shutdown, ServerConfig};
pub use types::AtriumSchema;
pub use users::{Avatar, AvatarRating, User};
