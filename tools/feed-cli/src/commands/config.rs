//! Configuration commands.

use std::path::Path;

use anyhow::{bail, Context as _, Result};
use feed_core::ClientConfig;

use super::{ConfigArgs, ConfigCommand};
use crate::context::Context;

/// Run the config command.
pub async fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show(ctx),
        ConfigCommand::Init { path, force } => init(&path, force, ctx),
    }
}

fn show(ctx: &Context) -> Result<()> {
    if ctx.output.is_json() {
        ctx.output.json(&ctx.config);
        return Ok(());
    }

    let source = ctx
        .config_path
        .as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "(defaults)".to_string());
    ctx.output.header(&format!("Configuration from {}", source));
    let rendered = toml::to_string_pretty(&ctx.config).context("Failed to serialize config")?;
    println!("{}", rendered);
    Ok(())
}

fn init(path: &str, force: bool, ctx: &Context) -> Result<()> {
    if Path::new(path).exists() && !force {
        bail!("{} already exists (use --force to overwrite)", path);
    }

    let content =
        toml::to_string_pretty(&ClientConfig::default()).context("Failed to serialize config")?;
    std::fs::write(path, content).with_context(|| format!("Failed to write config file: {}", path))?;
    ctx.output.success(&format!("Wrote {}", path));
    Ok(())
}
