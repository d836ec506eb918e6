//! Feed state controller.
//!
//! This crate provides:
//! - `QueryClient` - The per-session pair of query caches (users, feed pages)
//! - `Selection` - User / category / page / signal-toggle selection
//! - `FeedController` - Applies transitions, resolves queries, drops superseded responses
//! - `FeedViewModel` - Immutable snapshot published to subscribers
//!
//! The controller spawns its fetches on the ambient tokio runtime, so
//! transitions must be called from within one.

mod client;
mod controller;
mod selection;
mod view;

pub use client::*;
pub use controller::*;
pub use selection::*;
pub use view::*;
