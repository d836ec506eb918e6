//! Section renderers for the feed page.

mod banner;
mod card;
mod filters;
mod header;
mod login;
mod pagination;
mod skeleton;

pub use banner::*;
pub use card::*;
pub use filters::*;
pub use header::*;
pub use login::*;
pub use pagination::*;
pub use skeleton::*;
