mod avatar;
mod pagination;
mod registry;

pub use avatar::*;
pub use pagination::*;
pub use registry::*;
