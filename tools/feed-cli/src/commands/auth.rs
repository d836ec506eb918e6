//! Session commands: login, logout, status.

use anyhow::{bail, Context as _, Result};
use dialoguer::{Input, Password};
use feed_views::{render_login_intro, INVALID_CREDENTIALS};

use super::LoginArgs;
use crate::context::Context;

/// Run the login command.
pub async fn login(args: LoginArgs, ctx: &Context) -> Result<()> {
    if ctx.gate.is_authenticated().context("Failed to read session")? {
        ctx.output.success("Already logged in.");
        return Ok(());
    }

    if args.username.is_none() || args.password.is_none() {
        ctx.output.page(&render_login_intro());
    }

    let username = match args.username {
        Some(username) => username,
        None => Input::<String>::new()
            .with_prompt("Username")
            .interact_text()?,
    };
    let password = match args.password {
        Some(password) => password,
        None => Password::new().with_prompt("Password").interact()?,
    };

    if !ctx
        .gate
        .login(&username, &password)
        .context("Failed to store session")?
    {
        bail!(INVALID_CREDENTIALS);
    }

    ctx.output.success("Logged in.");
    Ok(())
}

/// Run the logout command.
pub async fn logout(ctx: &Context) -> Result<()> {
    ctx.gate.logout().context("Failed to clear session")?;
    ctx.output.success("Logged out.");
    Ok(())
}

/// Run the status command.
pub async fn status(ctx: &Context) -> Result<()> {
    let logged_in = ctx.gate.is_authenticated().context("Failed to read session")?;
    let session_path = ctx.gate.store().path().display().to_string();
    let config_path = ctx
        .config_path
        .as_ref()
        .map(|p| p.display().to_string());

    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({
            "logged_in": logged_in,
            "api_base_url": ctx.config.api_base_url,
            "session_path": session_path,
            "config_path": config_path,
        }));
        return Ok(());
    }

    ctx.output.header("Feed client");
    ctx.output.kv("Logged in", if logged_in { "yes" } else { "no" });
    ctx.output.kv("Gateway", &ctx.config.api_base_url);
    ctx.output.kv("Session file", &session_path);
    ctx.output
        .kv("Config file", config_path.as_deref().unwrap_or("(defaults)"));
    Ok(())
}
