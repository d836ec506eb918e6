//! Login screen text.

pub const LOGIN_TITLE: &str = "Login";
pub const LOGIN_HINT: &str = "Use demo / tacticalreport to continue.";
pub const INVALID_CREDENTIALS: &str = "Invalid credentials. Try demo / tacticalreport.";

/// Heading shown above the login prompts.
pub fn render_login_intro() -> String {
    format!("{}\n{}", LOGIN_TITLE, LOGIN_HINT)
}
