//! Research Chat - terminal client for a question-answering service
//!
#![doc = "Research Chat"]
#![doc = "Main entry point for the Research Chat client."]

use anyhow::Result;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use research_chat::cli::{Cli, Commands};
use research_chat::commands;
use research_chat::config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command line arguments
    let cli = Cli::parse_args();

    init_tracing(cli.verbose);

    // Load configuration
    let config_path = cli.config.as_deref().unwrap_or("config/config.yaml");
    let config = Config::load(config_path, &cli)?;

    // Validate configuration
    config.validate()?;

    match cli.command {
        Commands::Chat { chat, new } => {
            tracing::info!("Starting interactive chat mode");
            if let Some(id) = &chat {
                tracing::debug!("Opening chat: {}", id);
            }
            commands::chat::run_chat(config, chat, new).await?;
            Ok(())
        }
        Commands::Ask { query, chat, new } => {
            tracing::info!("Asking a single question");
            commands::ask::run_ask(config, query, chat, new).await?;
            Ok(())
        }
        Commands::History { command } => {
            tracing::info!("Starting history command");
            commands::history::handle_history(&config, command)?;
            Ok(())
        }
    }
}

/// Initialize tracing subscriber with environment filter
///
/// `RUST_LOG` wins; otherwise `--verbose` selects debug output for this
/// crate and the default keeps the interactive session quiet.
fn init_tracing(verbose: bool) {
    let default_level = if verbose {
        "research_chat=debug"
    } else {
        "research_chat=warn"
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
