//! User and avatar types.

use async_graphql::{Context, ErrorExtensions, Object, Result, ID};

use atrium_core::models::{AvatarRating as CoreAvatarRating, User as UserModel};
use atrium_core::ports::{AvatarData, AvatarRequest};
use atrium_core::relay::to_global_id;
use atrium_core::services::AvatarService;

/// Global ID type name for users.
pub const USER_TYPE: &str = "user";

/// Avatar content rating.
#[derive(async_graphql::Enum, Clone, Copy, Debug, PartialEq, Eq)]
#[graphql(name = "AvatarRatingEnum")]
pub enum AvatarRating {
    G,
    Pg,
    R,
    X,
}

impl From<AvatarRating> for CoreAvatarRating {
    fn from(rating: AvatarRating) -> Self {
        match rating {
            AvatarRating::G => CoreAvatarRating::G,
            AvatarRating::Pg => CoreAvatarRating::Pg,
            AvatarRating::R => CoreAvatarRating::R,
            AvatarRating::X => CoreAvatarRating::X,
        }
    }
}

/// Avatar metadata.
#[derive(async_graphql::SimpleObject)]
pub struct Avatar {
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

impl From<AvatarData> for Avatar {
    fn from(a: AvatarData) -> Self {
        Self {
            default: a.default,
            extra_attr: a.extra_attr,
            force_default: a.force_default,
            found_avatar: a.found_avatar,
            height: a.height,
            rating: a.rating,
            scheme: a.scheme,
            size: a.size,
            url: a.url,
            width: a.width,
        }
    }
}

/// A platform user.
pub struct User(pub UserModel);

#[Object]
impl User {
    /// Global ID of the user.
    async fn id(&self) -> ID {
        ID(to_global_id(USER_TYPE, &self.0.id.to_string()))
    }

    /// Database identifier.
    async fn database_id(&self) -> Result<i64> {
        i64::try_from(self.0.id).map_err(|_| {
            async_graphql::Error::new(format!("User id {} does not fit in a 64-bit integer", self.0.id))
                .extend_with(|_, ext| ext.set("code", "INTERNAL_SERVER_ERROR"))
        })
    }

    /// Display name.
    async fn name(&self) -> &str {
        &self.0.display_name
    }

    /// Avatar for the user. Sizes below 1 fall back to 96.
    async fn avatar<'ctx>(
        &self,
        ctx: &Context<'ctx>,
        #[graphql(default = 96)] size: Option<i32>,
        force_default: Option<bool>,
        rating: Option<AvatarRating>,
    ) -> Result<Avatar> {
        let avatars = ctx.data::<AvatarService>()?;

        let request = AvatarRequest {
            size,
            force_default,
            rating: rating.map(Into::into),
        };

        Ok(Avatar::from(avatars.resolve(&self.0, request)))
    }
}
