//! Parrot CLI — the main entry point.
//!
//! Commands:
//! - `chat`      — Parrot a prompt, optionally in a style (`--command likeyoda`)
//! - `models`    — List the configured models
//! - `repeat`    — Say something back, no model involved
//! - `tool`      — Run one of the standalone tools
//! - `followups` — Show suggested follow-up prompts
//! - `feedback`  — Rate a response
//! - `config`    — Manage the configuration file

use clap::{Parser, Subcommand};

mod commands;
mod sink;

#[derive(Parser)]
#[command(
    name = "parrot",
    about = "Parrot — repeats what you say, plainly or like a pirate",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Parrot a prompt, resolving `#name` references first
    Chat(commands::chat::ChatArgs),

    /// List the models available for style commands
    Models,

    /// Repeat the given text
    Repeat {
        /// Text to repeat
        text: Option<String>,
    },

    /// Run a standalone tool
    Tool {
        #[command(subcommand)]
        tool: commands::tool::ToolCommand,
    },

    /// Show suggested follow-up prompts
    Followups,

    /// Give feedback on a response
    Feedback {
        /// helpful or unhelpful
        kind: commands::feedback::FeedbackArg,

        /// Why the response was unhelpful
        #[arg(short, long)]
        reason: Option<String>,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Write a default config file if none exists
    Init,
    /// Print the effective configuration
    Show,
    /// Print the config file path
    Path,
    /// Check the configuration for problems
    Validate,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Logs go to stderr so streamed responses on stdout stay clean
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(cli.command).await {
        eprintln!("{}", fatal_message(e.as_ref()));
        std::process::exit(1);
    }
}

async fn run(command: Commands) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        Commands::Chat(args) => commands::chat::run(args).await?,
        Commands::Models => commands::models::run().await?,
        Commands::Repeat { text } => commands::repeat::run(text),
        Commands::Tool { tool } => commands::tool::run(tool).await?,
        Commands::Followups => commands::followups::run()?,
        Commands::Feedback { kind, reason } => commands::feedback::run(kind, reason),
        Commands::Config { action } => match action {
            ConfigAction::Init => commands::config_cmd::init()?,
            ConfigAction::Show => commands::config_cmd::show()?,
            ConfigAction::Path => commands::config_cmd::path(),
            ConfigAction::Validate => commands::config_cmd::validate()?,
        },
    }

    Ok(())
}

/// The single line-oriented message printed for a fatal error.
fn fatal_message(error: &dyn std::error::Error) -> String {
    format!("Error: {error}")
}
