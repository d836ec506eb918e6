//! Demo login gate for the feed client.
//!
//! A fixed credential pair flips a flag in a durable key-value store. This is
//! a convenience gate, not a security boundary: there is no token, no expiry
//! and no server-side check.

mod error;
mod gate;
mod store;

pub use error::AuthError;
pub use gate::{AuthGate, DEMO_PASSWORD, DEMO_USERNAME, SESSION_KEY, SESSION_VALUE};
pub use store::{default_session_path, FileStore, MemoryStore, SessionStore};
