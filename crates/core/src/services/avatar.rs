//! Avatar resolution.
//!
//! [`AvatarService`] applies argument defaults once and delegates to an
//! [`AvatarProvider`]. [`GravatarProvider`] is the default provider.

use std::sync::Arc;

use sha2::{Digest, Sha256};
use tracing::trace;
use url::Url;

use crate::error::{DomainError, DomainResult};
use crate::metrics::record_avatar_resolution;
use crate::models::User;
use crate::ports::{AvatarArgs, AvatarData, AvatarProvider, AvatarRequest, DEFAULT_AVATAR_SIZE};

// =============================================================================
// Configuration
// =============================================================================

/// Avatar configuration.
#[derive(Debug, Clone)]
pub struct AvatarConfig {
    /// Base URL of the avatar service; the email hash is appended as a path segment.
    pub base_url: String,
    /// Default image keyword passed to the service.
    pub default_image: String,
}

impl Default for AvatarConfig {
    fn default() -> Self {
        Self {
            base_url: "https://secure.gravatar.com/avatar".to_string(),
            default_image: "mm".to_string(),
        }
    }
}

// =============================================================================
// AvatarService
// =============================================================================

/// Normalises avatar arguments and resolves them through a provider.
#[derive(Clone)]
pub struct AvatarService {
    provider: Arc<dyn AvatarProvider>,
    default_image: String,
}

impl AvatarService {
    pub fn new(provider: Arc<dyn AvatarProvider>, default_image: impl Into<String>) -> Self {
        Self {
            provider,
            default_image: default_image.into(),
        }
    }

    /// Apply defaults: non-positive or missing size becomes 96, rating `g`,
    /// `force_default` false.
    pub fn normalize(&self, request: AvatarRequest) -> AvatarArgs {
        AvatarArgs {
            size: request
                .size
                .filter(|s| *s > 0)
                .unwrap_or(DEFAULT_AVATAR_SIZE),
            force_default: request.force_default.unwrap_or(false),
            rating: request.rating.unwrap_or_default(),
            default: self.default_image.clone(),
        }
    }

    /// Resolve avatar data for `user`.
    pub fn resolve(&self, user: &User, request: AvatarRequest) -> AvatarData {
        let args = self.normalize(request);
        let data = self.provider.avatar_data(user, &args);
        trace!(user = user.id, size = data.size, found = data.found_avatar, "Avatar resolved");
        record_avatar_resolution(data.found_avatar);
        data
    }
}

// =============================================================================
// GravatarProvider
// =============================================================================

/// Gravatar-compatible provider: `<base>/<sha256(email)>?s=&d=&r=[&f=y]`.
#[derive(Debug, Clone)]
pub struct GravatarProvider {
    base_url: Url,
}

impl GravatarProvider {
    pub fn new(config: &AvatarConfig) -> DomainResult<Self> {
        let base_url = Url::parse(&config.base_url).map_err(|e| DomainError::InvalidArgument {
            name: "avatar_base_url",
            reason: e.to_string(),
        })?;
        if base_url.cannot_be_a_base() {
            return Err(DomainError::InvalidArgument {
                name: "avatar_base_url",
                reason: format!("{} cannot carry a path", config.base_url),
            });
        }
        Ok(Self { base_url })
    }

    /// Hex SHA-256 of the trimmed, lowercased email.
    pub fn email_hash(email: &str) -> String {
        hex::encode(Sha256::digest(email.trim().to_lowercase().as_bytes()))
    }
}

impl AvatarProvider for GravatarProvider {
    fn avatar_data(&self, user: &User, args: &AvatarArgs) -> AvatarData {
        let email = user.email.as_deref().filter(|e| !e.trim().is_empty());

        let mut url = self.base_url.clone();
        if let Some(email) = email {
            if let Ok(mut segments) = url.path_segments_mut() {
                segments.pop_if_empty().push(&Self::email_hash(email));
            }
        }
        {
            let mut query = url.query_pairs_mut();
            query
                .append_pair("s", &args.size.to_string())
                .append_pair("d", &args.default)
                .append_pair("r", args.rating.as_str());
            if args.force_default {
                query.append_pair("f", "y");
            }
        }

        AvatarData {
            found_avatar: email.is_some(),
            url: Some(url.into()),
            ..AvatarData::from_args(args)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AvatarRating;

    fn user(email: Option<&str>) -> User {
        User {
            id: 1,
            email: email.map(str::to_string),
            display_name: "admin".into(),
        }
    }

    fn service() -> AvatarService {
        let provider = GravatarProvider::new(&AvatarConfig::default()).unwrap();
        AvatarService::new(Arc::new(provider), "mm")
    }

    // Test critique: une taille nulle ou négative revient à 96
    #[test]
    fn test_normalize_defaults_size() {
        let service = service();
        for size in [None, Some(0), Some(-5)] {
            let args = service.normalize(AvatarRequest {
                size,
                ..Default::default()
            });
            assert_eq!(args.size, 96);
        }
        let args = service.normalize(AvatarRequest {
            size: Some(48),
            ..Default::default()
        });
        assert_eq!(args.size, 48);
        assert_eq!(args.rating, AvatarRating::G);
        assert!(!args.force_default);
    }

    #[test]
    fn test_gravatar_url_and_dimensions() {
        let data = service().resolve(
            &user(Some(" Test@Test.com ")),
            AvatarRequest {
                size: Some(0),
                force_default: Some(true),
                rating: Some(AvatarRating::G),
            },
        );

        let hash = GravatarProvider::email_hash("test@test.com");
        assert_eq!(
            data.url.as_deref(),
            Some(format!("https://secure.gravatar.com/avatar/{hash}?s=96&d=mm&r=g&f=y").as_str())
        );
        assert_eq!((data.size, data.height, data.width), (96, 96, 96));
        assert_eq!(data.rating, "g");
        assert_eq!(data.default, "mm");
        assert!(data.force_default && data.found_avatar);
        assert_eq!(data.scheme, None);
        assert_eq!(data.extra_attr, None);
    }

    #[test]
    fn test_user_without_email_is_not_found() {
        let data = service().resolve(&user(None), AvatarRequest::default());
        assert!(!data.found_avatar);
        assert_eq!(
            data.url.as_deref(),
            Some("https://secure.gravatar.com/avatar?s=96&d=mm&r=g")
        );
    }

    #[test]
    fn test_invalid_base_url_is_rejected() {
        let config = AvatarConfig {
            base_url: "mailto:someone".into(),
            ..Default::default()
        };
        assert!(GravatarProvider::new(&config).is_err());
        let config = AvatarConfig {
            base_url: "not a url".into(),
            ..Default::default()
        };
        assert!(GravatarProvider::new(&config).is_err());
    }
}
