//! Port trait for avatar resolution.

use crate::models::{AvatarRating, User};

/// Size used when the requested size is missing or not a positive integer.
pub const DEFAULT_AVATAR_SIZE: i32 = 96;

/// Raw avatar arguments as received from the API.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AvatarRequest {
    pub size: Option<i32>,
    pub force_default: Option<bool>,
    pub rating: Option<AvatarRating>,
}

/// Avatar arguments after defaults have been applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvatarArgs {
    /// Square size in pixels, always positive.
    pub size: i32,
    pub force_default: bool,
    pub rating: AvatarRating,
    /// Default image keyword or URL (`mm`, `identicon`, ...).
    pub default: String,
}

/// Resolved avatar metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvatarData {
    pub default: String,
    pub extra_attr: Option<String>,
    pub force_default: bool,
    pub found_avatar: bool,
    pub height: i32,
    pub rating: String,
    pub scheme: Option<String>,
    pub size: i32,
    pub url: Option<String>,
    pub width: i32,
}

impl AvatarData {
    /// Avatar data echoing normalised arguments, with no URL and nothing found.
    pub fn from_args(args: &AvatarArgs) -> Self {
        Self {
            default: args.default.clone(),
            extra_attr: None,
            force_default: args.force_default,
            found_avatar: false,
            height: args.size,
            rating: args.rating.as_str().to_string(),
            scheme: None,
            size: args.size,
            url: None,
            width: args.size,
        }
    }
}

/// Produces avatar data for a user.
///
/// Providers receive fully normalised [`AvatarArgs`]; defaulting is done
/// once by [`crate::services::AvatarService`].
pub trait AvatarProvider: Send + Sync {
    fn avatar_data(&self, user: &User, args: &AvatarArgs) -> AvatarData;
}
