//! Observability for the feed client.
//!
//! This crate provides:
//! - `init_logging` - Installs the `tracing` subscriber (human or JSON output)
//! - `SessionMetrics` - Query cache counters for one session

mod logging;
mod metrics;

pub use logging::*;
pub use metrics::*;
