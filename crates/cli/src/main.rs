//! Memoria CLI — the terminal assistant screen.
//!
//! Commands:
//! - `chat`     — Interactive conversation with the assistant
//! - `ask`      — One question, one reply
//! - `prompts`  — List the suggested prompts
//! - `config`   — Show, validate, or locate the configuration

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use memoria_config::{AppConfig, ConfigError};

mod commands;
mod input;
mod screen;

#[derive(Parser)]
#[command(
    name = "memoria",
    about = "Memoria — your personal life-tracking assistant",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    log_json: bool,

    /// Use this config file instead of ~/.memoria/config.toml
    #[arg(short, long, global = true, env = "MEMORIA_CONFIG")]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Chat with the assistant
    Chat,

    /// Ask a single question and print the reply
    Ask {
        /// What to ask
        text: String,

        /// Print the whole transcript as JSON
        #[arg(long)]
        json: bool,
    },

    /// List the suggested prompts
    Prompts,

    /// Configuration management
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the effective configuration as TOML
    Show,
    /// Check the configuration for problems
    Validate,
    /// Print the config file location
    Path,
}

fn load_config(path: Option<&std::path::Path>) -> Result<AppConfig, ConfigError> {
    match path {
        Some(path) => AppConfig::load_from(path),
        None => AppConfig::load(),
    }
}

fn init_tracing(verbose: bool, json: bool, level: &str) {
    let filter = if verbose { "debug" } else { level };
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter));

    // Logs go to stderr so they never interleave with the transcript
    if json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .init();
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = load_config(cli.config.as_deref());
    let logging = config
        .as_ref()
        .map(|c| c.logging.clone())
        .unwrap_or_default();
    init_tracing(cli.verbose, cli.log_json || logging.json, &logging.level);

    match cli.command {
        Commands::Chat => commands::chat::run(config?).await?,
        Commands::Ask { text, json } => commands::ask::run(config?, text, json).await?,
        Commands::Prompts => commands::prompts::run(&config?),
        Commands::Config { action } => match action {
            ConfigAction::Show => commands::config_cmd::show(&config?)?,
            ConfigAction::Validate => commands::config_cmd::validate(config)?,
            ConfigAction::Path => commands::config_cmd::path(cli.config.as_deref()),
        },
    }

    Ok(())
}
