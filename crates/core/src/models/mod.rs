//! Domain models for registered assets and users.
//!
//! These models are storage-agnostic and represent the canonical
//! form of platform state within the domain layer.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

// =============================================================================
// Assets
// =============================================================================

/// Kind of front-end asset held by the registry.
///
/// Each kind has its own ordered collection, its own default version
/// and its own cursor/global-ID namespace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetKind {
    Script,
    Stylesheet,
}

impl AssetKind {
    /// Tag used in connection cursors and metric labels.
    pub fn cursor_tag(self) -> &'static str {
        match self {
            AssetKind::Script => "script",
            AssetKind::Stylesheet => "stylesheet",
        }
    }

    /// Type name used in Relay global IDs.
    pub fn global_id_type(self) -> &'static str {
        match self {
            AssetKind::Script => "enqueued_script",
            AssetKind::Stylesheet => "enqueued_stylesheet",
        }
    }
}

impl std::fmt::Display for AssetKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.cursor_tag())
    }
}

/// A script or stylesheet registered under a unique handle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegisteredAsset {
    /// Unique handle within its kind.
    pub handle: String,
    /// Source URL. `None` for alias handles that only pull in dependencies.
    #[serde(default)]
    pub src: Option<String>,
    /// Asset version. Falls back to the registry default when absent or empty.
    #[serde(default, alias = "ver")]
    pub version: Option<String>,
    /// Handles this asset depends on, in declaration order.
    #[serde(default, alias = "deps")]
    pub dependencies: Vec<String>,
    /// Loading arguments (media query for stylesheets, strategy for scripts).
    #[serde(default)]
    pub args: Option<String>,
    /// Free-form extra data (`data`, `before`, `after`, `conditional`, `group`...).
    #[serde(default)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl RegisteredAsset {
    /// Create an asset with just a handle and source.
    pub fn new(handle: impl Into<String>, src: Option<&str>) -> Self {
        Self {
            handle: handle.into(),
            src: src.map(str::to_string),
            version: None,
            dependencies: Vec::new(),
            args: None,
            extra: BTreeMap::new(),
        }
    }

    /// Builder-style version setter.
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    /// Builder-style dependency setter.
    pub fn with_dependencies<I, S>(mut self, deps: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.dependencies = deps.into_iter().map(Into::into).collect();
        self
    }

    /// Builder-style extra data setter.
    pub fn with_extra(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.extra.insert(key.into(), value);
        self
    }

    /// Version to expose, resolving empty/missing versions to `default_version`.
    pub fn resolved_version(&self, default_version: Option<&str>) -> Option<String> {
        match self.version.as_deref() {
            Some(v) if !v.is_empty() => Some(v.to_string()),
            _ => default_version.map(str::to_string),
        }
    }

    /// Inline data attached under `extra["data"]`.
    ///
    /// Strings are returned as-is, other JSON values as their JSON text.
    pub fn extra_data(&self) -> Option<String> {
        match self.extra.get("data")? {
            serde_json::Value::Null => None,
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// String list stored under an `extra` key (`before`/`after` inline code).
    pub fn extra_strings(&self, key: &str) -> Vec<String> {
        match self.extra.get(key) {
            Some(serde_json::Value::Array(items)) => items
                .iter()
                .filter_map(|v| v.as_str().map(str::to_string))
                .collect(),
            Some(serde_json::Value::String(s)) => vec![s.clone()],
            _ => Vec::new(),
        }
    }

    /// String stored under an `extra` key.
    pub fn extra_str(&self, key: &str) -> Option<&str> {
        self.extra.get(key).and_then(|v| v.as_str())
    }

    /// Integer stored under an `extra` key.
    pub fn extra_i64(&self, key: &str) -> Option<i64> {
        self.extra.get(key).and_then(|v| v.as_i64())
    }
}

/// Read-only view of one asset collection, taken once per request.
#[derive(Debug, Clone, Default)]
pub struct AssetSnapshot {
    /// Assets in registration order.
    pub assets: Vec<RegisteredAsset>,
    /// Version reported for assets registered without one.
    pub default_version: Option<String>,
}

impl AssetSnapshot {
    /// Find an asset by handle.
    pub fn get(&self, handle: &str) -> Option<&RegisteredAsset> {
        self.assets.iter().find(|a| a.handle == handle)
    }
}

// =============================================================================
// Users
// =============================================================================

/// A platform user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Database identifier.
    pub id: u64,
    /// Email address, used to derive the avatar hash.
    #[serde(default)]
    pub email: Option<String>,
    /// Display name.
    #[serde(default)]
    pub display_name: String,
}

/// Avatar content rating.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AvatarRating {
    #[default]
    G,
    Pg,
    R,
    X,
}

impl AvatarRating {
    /// Lowercase form reported in avatar data and URLs.
    pub fn as_str(self) -> &'static str {
        match self {
            AvatarRating::G => "g",
            AvatarRating::Pg => "pg",
            AvatarRating::R => "r",
            AvatarRating::X => "x",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_resolved_version_falls_back_to_default() {
        let asset = RegisteredAsset::new("a", Some("/a.js"));
        assert_eq!(asset.resolved_version(Some("6.4")), Some("6.4".into()));

        let empty = RegisteredAsset::new("b", None).with_version("");
        assert_eq!(empty.resolved_version(Some("6.4")), Some("6.4".into()));

        let pinned = RegisteredAsset::new("c", None).with_version("1.2.3");
        assert_eq!(pinned.resolved_version(Some("6.4")), Some("1.2.3".into()));
    }

    #[test]
    fn test_extra_data_renders_strings_and_json() {
        let plain = RegisteredAsset::new("a", None).with_extra("data", json!("var x = 1;"));
        assert_eq!(plain.extra_data().as_deref(), Some("var x = 1;"));

        let object = RegisteredAsset::new("b", None).with_extra("data", json!({"k": 1}));
        assert_eq!(object.extra_data().as_deref(), Some(r#"{"k":1}"#));

        assert_eq!(RegisteredAsset::new("c", None).extra_data(), None);
    }

    // Le manifeste utilise parfois les noms courts `ver` et `deps`
    #[test]
    fn test_asset_deserializes_short_field_names() {
        let asset: RegisteredAsset = serde_json::from_value(json!({
            "handle": "jquery",
            "ver": "3.7.1",
            "deps": ["jquery-core", "jquery-migrate"]
        }))
        .unwrap();

        assert_eq!(asset.version.as_deref(), Some("3.7.1"));
        assert_eq!(asset.dependencies, vec!["jquery-core", "jquery-migrate"]);
        assert!(asset.src.is_none());
    }
}
