//! Feed CLI - Terminal client for the personalized feed.
//!
//! Commands:
//! - `feed login` / `feed logout` / `feed status` - Demo session gate
//! - `feed users` - List users
//! - `feed reports` - List raw reports
//! - `feed show` - Render one feed page
//! - `feed browse` - Interactive feed browser
//! - `feed config` - Inspect or create the config file

mod commands;
mod context;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use feed_observability::{init_logging, LogFormat, Verbosity};

use commands::{BrowseArgs, ConfigArgs, LoginArgs, ReportsArgs, ShowArgs};

/// Feed CLI - Browse a personalized, ranked report feed
#[derive(Parser)]
#[command(name = "feed")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use JSON output format
    #[arg(long, global = true)]
    json: bool,

    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Gateway base URL (overrides config and FEED_API_BASE_URL)
    #[arg(long, global = true)]
    api_base_url: Option<String>,

    /// Log output format (human or json)
    #[arg(long, global = true, default_value = "human")]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign in with the demo credentials
    Login(LoginArgs),

    /// Clear the session
    Logout,

    /// Show session and gateway settings
    Status,

    /// List users
    Users,

    /// List reports
    Reports(ReportsArgs),

    /// Render one page of a user's feed
    Show(ShowArgs),

    /// Browse the feed interactively
    Browse(BrowseArgs),

    /// Manage configuration
    Config(ConfigArgs),
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let verbosity = if cli.verbose {
        Verbosity::Verbose
    } else {
        Verbosity::Quiet
    };
    init_logging(cli.log_format, verbosity)?;

    let output = output::Output::new(cli.verbose, cli.json);

    let ctx = match context::Context::load(
        cli.config.as_deref(),
        cli.api_base_url.as_deref(),
        output.clone(),
    ) {
        Ok(ctx) => ctx,
        Err(e) => {
            output.error(&format!("{:#}", e));
            std::process::exit(1);
        }
    };

    let result = match cli.command {
        Commands::Login(args) => commands::auth::login(args, &ctx).await,
        Commands::Logout => commands::auth::logout(&ctx).await,
        Commands::Status => commands::auth::status(&ctx).await,
        Commands::Users => commands::users::run(&ctx).await,
        Commands::Reports(args) => commands::reports::run(args, &ctx).await,
        Commands::Show(args) => commands::show::run(args, &ctx).await,
        Commands::Browse(args) => commands::browse::run(args, &ctx).await,
        Commands::Config(args) => commands::config::run(args, &ctx).await,
    };

    if let Err(e) = result {
        ctx.output.error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}
