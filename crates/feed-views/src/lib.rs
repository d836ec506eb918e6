//! Presentation components for the feed client.
//!
//! Every renderer is a pure function from a view-model snapshot (or part of
//! one) to plain text; styling is left to the front end.

mod page;
pub mod sections;

pub use page::*;
pub use sections::*;
