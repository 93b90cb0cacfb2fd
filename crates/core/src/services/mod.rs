mod avatar;
mod pager;

pub use avatar::{AvatarConfig, AvatarService, GravatarProvider};
pub use pager::{ConflictPolicy, ConnectionPager, CursorKey, PagerConfig};
