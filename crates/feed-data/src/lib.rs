//! Gateway access for the personalized feed API.
//!
//! This crate provides:
//! - `FeedGateway` - Read-only gateway contract (users, reports, feed)
//! - `HttpGateway` - `reqwest` implementation against the real API
//!
//! # Example
//!
//! ```ignore
//! use feed_data::{FeedGateway, HttpGateway};
//!
//! let gateway = HttpGateway::new("http://localhost:8000")?;
//! let users = gateway.users().await?;
//! ```

mod client;
mod gateway;

pub use client::*;
pub use gateway::*;
