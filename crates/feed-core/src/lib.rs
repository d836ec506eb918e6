//! Shared model for the personalized feed client.
//!
//! This crate provides:
//! - `User`, `Report`, `FeedItem`, `FeedResponse` - Gateway data model
//! - `QueryKey` - Composite key identifying one feed page
//! - `Pagination` - Page math (total pages, clamping, prev/next)
//! - `FeedError` - Error taxonomy shared by every layer
//! - `ClientConfig` - Base URL, page size and staleness windows

mod config;
mod error;
mod key;
mod model;
mod pagination;

pub use config::*;
pub use error::*;
pub use key::*;
pub use model::*;
pub use pagination::*;
