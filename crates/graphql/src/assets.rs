//! Registered asset nodes and their connections.

use std::sync::Arc;

use async_graphql::{Object, ID};

use atrium_core::models::{AssetKind, AssetSnapshot, RegisteredAsset};
use atrium_core::relay::to_global_id;

use crate::schema::PageInfo;

/// Media query reported for stylesheets registered without one.
const DEFAULT_MEDIA: &str = "all";

/// A registered asset together with the snapshot it was read from.
///
/// Keeping the snapshot lets `dependencies` resolve against the same
/// view of the registry as the connection that produced the node.
#[derive(Clone)]
struct AssetView {
    kind: AssetKind,
    asset: RegisteredAsset,
    snapshot: Arc<AssetSnapshot>,
}

impl AssetView {
    fn id(&self) -> ID {
        ID(to_global_id(self.kind.global_id_type(), &self.asset.handle))
    }

    fn version(&self) -> Option<String> {
        self.asset
            .resolved_version(self.snapshot.default_version.as_deref())
    }

    fn dependencies(&self) -> impl Iterator<Item = AssetView> + '_ {
        self.asset
            .dependencies
            .iter()
            .filter_map(|handle| self.snapshot.get(handle))
            .map(|asset| AssetView {
                kind: self.kind,
                asset: asset.clone(),
                snapshot: self.snapshot.clone(),
            })
    }
}

/// Generate an asset node type sharing the common `EnqueuedAsset` fields.
macro_rules! define_asset_node {
    ($(#[$meta:meta])* $node:ident, { $($extra:tt)* }) => {
        $(#[$meta])*
        #[derive(Clone)]
        pub struct $node(AssetView);

        impl $node {
            pub fn new(asset: RegisteredAsset, snapshot: Arc<AssetSnapshot>) -> Self {
                Self(AssetView {
                    kind: <$node>::KIND,
                    asset,
                    snapshot,
                })
            }
        }

        #[Object]
        impl $node {
            /// Global ID of the asset.
            async fn id(&self) -> ID {
                self.0.id()
            }

            /// Unique handle the asset was registered under.
            async fn handle(&self) -> &str {
                &self.0.asset.handle
            }

            /// Source URL, null for alias handles.
            async fn src(&self) -> Option<&str> {
                self.0.asset.src.as_deref()
            }

            /// Asset version, or the registry default version.
            async fn version(&self) -> Option<String> {
                self.0.version()
            }

            /// Inline data attached to the asset.
            async fn extra(&self) -> Option<String> {
                self.0.asset.extra_data()
            }

            /// Loading arguments.
            async fn args(&self) -> Option<&str> {
                self.0.asset.args.as_deref()
            }

            /// Inline code printed before the asset.
            async fn before(&self) -> Vec<String> {
                self.0.asset.extra_strings("before")
            }

            /// Inline code printed after the asset.
            async fn after(&self) -> Vec<String> {
                self.0.asset.extra_strings("after")
            }

            /// Conditional comment wrapping the asset.
            async fn conditional(&self) -> Option<&str> {
                self.0.asset.extra_str("conditional")
            }

            /// Registered assets this one depends on.
            async fn dependencies(&self) -> Vec<$node> {
                self.0.dependencies().map($node).collect()
            }

            $($extra)*
        }
    };
}

define_asset_node!(
    /// A registered script.
    EnqueuedScript,
    {
        /// Output group: 0 for the header, 1 for the footer. Null when out of range.
        async fn group(&self) -> Option<i32> {
            self.0
                .asset
                .extra_i64("group")
                .and_then(|g| i32::try_from(g).ok())
        }
    }
);

define_asset_node!(
    /// A registered stylesheet.
    EnqueuedStylesheet,
    {
        /// Media query the stylesheet applies to.
        async fn media(&self) -> &str {
            self.0.asset.args.as_deref().unwrap_or(DEFAULT_MEDIA)
        }
    }
);

impl EnqueuedScript {
    const KIND: AssetKind = AssetKind::Script;
}

impl EnqueuedStylesheet {
    const KIND: AssetKind = AssetKind::Stylesheet;
}

// -----------------------------------------------------------------------------
// Connection Types (Relay-style pagination)
// -----------------------------------------------------------------------------

/// Generate Relay-style connection types (Edge + Connection) with From impl.
macro_rules! define_connection {
    ($node:ty, $edge:ident, $connection:ident) => {
        #[derive(async_graphql::SimpleObject)]
        pub struct $edge {
            pub node: $node,
            pub cursor: String,
        }

        #[derive(async_graphql::SimpleObject)]
        pub struct $connection {
            pub edges: Vec<$edge>,
            pub nodes: Vec<$node>,
            pub page_info: PageInfo,
            pub total_count: Option<i64>,
        }

        impl From<atrium_core::ports::Connection<$node>> for $connection {
            fn from(conn: atrium_core::ports::Connection<$node>) -> Self {
                Self {
                    nodes: conn.nodes().cloned().collect(),
                    edges: conn
                        .edges
                        .into_iter()
                        .map(|e| $edge {
                            node: e.node,
                            cursor: e.cursor.value,
                        })
                        .collect(),
                    page_info: PageInfo::from(conn.page_info),
                    total_count: conn.total_count,
                }
            }
        }
    };
}

define_connection!(EnqueuedScript, RegisteredScriptEdge, RegisteredScriptConnection);
define_connection!(
    EnqueuedStylesheet,
    RegisteredStylesheetEdge,
    RegisteredStylesheetConnection
);
