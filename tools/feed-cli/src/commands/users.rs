//! List users.

use anyhow::{Context as _, Result};
use console::style;

use crate::context::Context;

/// Run the users command.
pub async fn run(ctx: &Context) -> Result<()> {
    ctx.require_login()?;
    let gateway = ctx.gateway()?;

    let spinner = ctx.output.spinner("Loading users...");
    let users = gateway.users().await;
    spinner.finish_and_clear();
    let users = users.context("Failed to load users")?;

    if ctx.output.is_json() {
        ctx.output.json(&users);
        return Ok(());
    }

    if users.is_empty() {
        ctx.output.info("No users available.");
        return Ok(());
    }

    ctx.output.header("Users");
    for user in &users {
        ctx.output
            .list_item(&format!("{}  {}", style(&user.id).dim(), user.label()));
        if ctx.output.is_verbose() {
            ctx.output.kv("Focus", &user.focus_categories.join(", "));
            ctx.output.kv("Tags", &user.focus_tags.join(", "));
        }
    }
    Ok(())
}
