//! GraphQL schema definition.
//!
//! This module provides the query root for users, avatars and the
//! `registeredScripts`/`registeredStylesheets` connections.

use std::sync::Arc;

use async_graphql::{Context, EmptyMutation, EmptySubscription, ErrorExtensions, Object, Result, Schema, ID};
use tracing::debug;

use atrium_core::error::DomainError;
use atrium_core::models::{AssetKind, AssetSnapshot, RegisteredAsset};
use atrium_core::ports::{AssetRegistry, Connection, Pagination, UserRepository};
use atrium_core::relay::expect_global_id;
use atrium_core::services::{AvatarService, ConnectionPager, PagerConfig};

use crate::assets::{
    EnqueuedScript, EnqueuedStylesheet, RegisteredScriptConnection,
    RegisteredStylesheetConnection,
};
use crate::types::AtriumSchema;
use crate::users::{User, USER_TYPE};

// -----------------------------------------------------------------------------
// Schema Configuration
// -----------------------------------------------------------------------------

/// Maximum query depth to prevent deeply nested queries (DoS protection).
/// Note: GraphQL introspection requires depth ~13, so we use 15 to allow it.
pub const MAX_QUERY_DEPTH: usize = 15;

/// Maximum query complexity score (DoS protection).
/// Each field has a default complexity of 1, nested objects multiply.
pub const MAX_QUERY_COMPLEXITY: usize = 500;

// -----------------------------------------------------------------------------
// Schema Builder
// -----------------------------------------------------------------------------

/// Build the GraphQL schema.
///
/// Registries are shared read-only; every connection query paginates a
/// fresh snapshot. Includes query depth and complexity limits.
pub fn build_schema<A, U>(
    assets: Arc<A>,
    users: Arc<U>,
    avatars: AvatarService,
    pager: PagerConfig,
) -> AtriumSchema
where
    A: AssetRegistry + 'static,
    U: UserRepository + 'static,
{
    let assets: Arc<dyn AssetRegistry> = assets;
    let users: Arc<dyn UserRepository> = users;
    Schema::build(Query, EmptyMutation, EmptySubscription)
        .data(assets)
        .data(users)
        .data(avatars)
        .data(pager)
        .limit_depth(MAX_QUERY_DEPTH)
        .limit_complexity(MAX_QUERY_COMPLEXITY)
        .finish()
}

// -----------------------------------------------------------------------------
// Query Root
// -----------------------------------------------------------------------------

/// Query root.
#[derive(Default)]
pub struct Query;

#[Object]
impl Query {
    /// Get a user by global ID.
    async fn user<'ctx>(&self, ctx: &Context<'ctx>, id: ID) -> Result<Option<User>> {
        let users = ctx.data::<Arc<dyn UserRepository>>()?;

        let database_id = parse_user_id(&id).map_err(api_error)?;
        let user = users.get_user(database_id).await.map_err(api_error)?;
        Ok(user.map(User))
    }

    /// Registered scripts, in registration order.
    async fn registered_scripts<'ctx>(
        &self,
        ctx: &Context<'ctx>,
        first: Option<i32>,
        after: Option<String>,
        last: Option<i32>,
        before: Option<String>,
    ) -> Result<RegisteredScriptConnection> {
        let pagination = Pagination::from_args(first, after, last, before);
        let (connection, snapshot) = asset_connection(ctx, AssetKind::Script, &pagination).await?;

        Ok(RegisteredScriptConnection::from(
            connection.map(|asset| EnqueuedScript::new(asset, snapshot.clone())),
        ))
    }

    /// Registered stylesheets, in registration order.
    async fn registered_stylesheets<'ctx>(
        &self,
        ctx: &Context<'ctx>,
        first: Option<i32>,
        after: Option<String>,
        last: Option<i32>,
        before: Option<String>,
    ) -> Result<RegisteredStylesheetConnection> {
        let pagination = Pagination::from_args(first, after, last, before);
        let (connection, snapshot) =
            asset_connection(ctx, AssetKind::Stylesheet, &pagination).await?;

        Ok(RegisteredStylesheetConnection::from(
            connection.map(|asset| EnqueuedStylesheet::new(asset, snapshot.clone())),
        ))
    }
}

/// Snapshot one asset collection and cut the requested page from it.
async fn asset_connection(
    ctx: &Context<'_>,
    kind: AssetKind,
    pagination: &Pagination,
) -> Result<(Connection<RegisteredAsset>, Arc<AssetSnapshot>)> {
    let registry = ctx.data::<Arc<dyn AssetRegistry>>()?;
    let config = ctx.data::<PagerConfig>()?;

    let snapshot = Arc::new(registry.snapshot(kind).await.map_err(api_error)?);
    debug!(%kind, total = snapshot.assets.len(), ?pagination, "Paginating assets");

    let pager = ConnectionPager::new(kind.cursor_tag(), config.clone());
    let connection = pager
        .paginate(&snapshot.assets, pagination)
        .map_err(api_error)?;

    Ok((connection, snapshot))
}

// -----------------------------------------------------------------------------
// GraphQL Types
// -----------------------------------------------------------------------------

/// Information about the current page of a connection.
#[derive(async_graphql::SimpleObject)]
pub struct PageInfo {
    pub has_next_page: bool,
    pub has_previous_page: bool,
    pub start_cursor: Option<String>,
    pub end_cursor: Option<String>,
}

impl From<atrium_core::ports::PageInfo> for PageInfo {
    fn from(info: atrium_core::ports::PageInfo) -> Self {
        Self {
            has_next_page: info.has_next_page,
            has_previous_page: info.has_previous_page,
            start_cursor: info.start_cursor.map(|c| c.value),
            end_cursor: info.end_cursor.map(|c| c.value),
        }
    }
}

// -----------------------------------------------------------------------------
// Helpers & Validation
// -----------------------------------------------------------------------------

/// Convert a domain error into a GraphQL error carrying `extensions.code`.
fn api_error(err: impl Into<DomainError>) -> async_graphql::Error {
    let err: DomainError = err.into();
    let code = err.code();
    async_graphql::Error::new(err.to_string()).extend_with(|_, ext| ext.set("code", code))
}

/// Decode a user global ID into a database id.
fn parse_user_id(id: &ID) -> Result<u64, DomainError> {
    let raw = expect_global_id(id.as_str(), USER_TYPE)?;
    raw.parse()
        .map_err(|_| DomainError::InvalidGlobalId(format!("{} is not a user ID", id.as_str())))
}
