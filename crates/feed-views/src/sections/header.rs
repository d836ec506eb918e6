//! Page header - title, tagline and the logout hint.

pub const FEED_TITLE: &str = "Personalized Feed";
pub const FEED_TAGLINE: &str = "Multi-signal ranking with explainability.";

/// Render the feed page header.
pub fn render_header() -> String {
    format!("{}\n{}\n[l] Logout", FEED_TITLE, FEED_TAGLINE)
}
