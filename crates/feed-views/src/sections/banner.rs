//! Error banner.

/// Render an error banner line.
pub fn render_banner(message: &str) -> String {
    format!("! {}", message)
}
