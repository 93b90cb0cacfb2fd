//! GraphQL response helpers for integration tests.
//!
//! This module provides fixtures and utilities for executing GraphQL
//! queries against an in-memory schema and asserting on the responses.

#![allow(dead_code)]

use std::sync::Arc;

use async_graphql::{Request, Variables};
use serde_json::{json, Value};

use atrium_core::models::{AssetKind, RegisteredAsset, User};
use atrium_core::ports::AvatarProvider;
use atrium_core::services::{AvatarConfig, AvatarService, GravatarProvider, PagerConfig};
use atrium_graphql::{build_schema, AtriumSchema};
use atrium_storage::MemoryStore;

pub const DEFAULT_SCRIPT_VERSION: &str = "6.4.2";
pub const DEFAULT_STYLE_VERSION: &str = "6.4.2";
pub const ADMIN_ID: u64 = 1;

/// Store with five scripts `a`..`e`, five stylesheets and one admin user.
pub async fn fixture_store() -> MemoryStore {
    let store = MemoryStore::new();
    let assets = store.assets();

    assets
        .set_default_version(AssetKind::Script, Some(DEFAULT_SCRIPT_VERSION.into()))
        .await;
    assets
        .set_default_version(AssetKind::Stylesheet, Some(DEFAULT_STYLE_VERSION.into()))
        .await;

    let scripts = [
        RegisteredAsset::new("a", Some("/js/a.js"))
            .with_version("1.0.0")
            .with_extra("data", json!("var a = {\"ajax\":\"/ajax\"};")),
        RegisteredAsset::new("b", Some("/js/b.js")).with_dependencies(["a"]),
        RegisteredAsset::new("c", Some("/js/c.js"))
            .with_version("")
            .with_extra("group", json!(1)),
        RegisteredAsset::new("d", None).with_dependencies(["a", "missing", "c"]),
        RegisteredAsset::new("e", Some("/js/e.js"))
            .with_extra("before", json!(["window.e = 1;"]))
            .with_extra("after", json!("e.init();")),
    ];
    for script in scripts {
        assets.register(AssetKind::Script, script).await.unwrap();
    }

    let mut print = RegisteredAsset::new("print", Some("/css/print.css"));
    print.args = Some("print".into());
    let stylesheets = [
        RegisteredAsset::new("dashicons", Some("/css/dashicons.css"))
            .with_version("6.4")
            .with_extra("data", json!("/* dashicons */")),
        RegisteredAsset::new("admin-bar", Some("/css/admin-bar.css"))
            .with_dependencies(["dashicons"]),
        RegisteredAsset::new("ie-only", Some("/css/ie.css"))
            .with_extra("conditional", json!("lt IE 9")),
        print,
        RegisteredAsset::new("global-styles", None)
            .with_extra("after", json!([":root{--gap:1rem}"])),
    ];
    for stylesheet in stylesheets {
        assets.register(AssetKind::Stylesheet, stylesheet).await.unwrap();
    }

    store
        .users()
        .insert(User {
            id: ADMIN_ID,
            email: Some("test@test.com".into()),
            display_name: "admin".into(),
        })
        .await
        .unwrap();

    store
}

/// Schema over `store` with the default Gravatar provider.
pub fn schema_for(store: &MemoryStore, pager: PagerConfig) -> AtriumSchema {
    let provider = GravatarProvider::new(&AvatarConfig::default()).unwrap();
    schema_with_avatars(store, Arc::new(provider), pager)
}

/// Schema over `store` with a custom avatar provider.
pub fn schema_with_avatars(
    store: &MemoryStore,
    provider: Arc<dyn AvatarProvider>,
    pager: PagerConfig,
) -> AtriumSchema {
    build_schema(
        store.assets(),
        store.users(),
        AvatarService::new(provider, "mm"),
        pager,
    )
}

/// Execute a GraphQL query with variables and return the parsed JSON response.
pub async fn execute(schema: &AtriumSchema, query: &str, variables: Value) -> Value {
    let request = Request::new(query).variables(Variables::from_json(variables));
    let response = schema.execute(request).await;
    serde_json::to_value(response).expect("Failed to serialize GraphQL response")
}

/// Helper to extract errors from a GraphQL response.
pub fn extract_errors(response: &Value) -> &[Value] {
    response
        .get("errors")
        .and_then(|e| e.as_array())
        .map(|a| a.as_slice())
        .unwrap_or(&[])
}

/// Assert that a GraphQL response has no errors.
pub fn assert_no_errors(response: &Value) {
    let errors = extract_errors(response);
    assert!(
        errors.is_empty(),
        "Expected no GraphQL errors, but got: {:?}",
        errors
    );
}

/// Extension code of the first error in a response.
pub fn first_error_code(response: &Value) -> Option<&str> {
    extract_errors(response)
        .first()
        .and_then(|e| e.pointer("/extensions/code"))
        .and_then(|c| c.as_str())
}

/// Handles of the `nodes` of a connection in a response.
pub fn node_handles(response: &Value, field: &str) -> Vec<String> {
    response["data"][field]["nodes"]
        .as_array()
        .map(|nodes| {
            nodes
                .iter()
                .filter_map(|n| n["handle"].as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default()
}
