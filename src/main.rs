use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use weatherdesk::weather::resolve_and_fetch;
use weatherdesk::{OpenMeteoClient, SearchState, WeatherDeskConfig, WeatherLookup, logging, repl, web};

/// Incremental place search with current weather cards
#[derive(Debug, Parser)]
#[command(name = "weatherdesk", version, about)]
struct Cli {
    /// Configuration file (defaults to <config dir>/weatherdesk/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log at debug level
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Interactive search with autocomplete
    Search,
    /// Print suggestions for a partial name
    Suggest { text: String },
    /// Resolve a place and print its current weather card
    Lookup { name: String },
    /// Serve the JSON API
    Serve {
        #[arg(long)]
        port: Option<u16>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = WeatherDeskConfig::load_from_path(cli.config.clone())
        .context("Failed to load configuration")?;
    if cli.verbose {
        config.logging.level = "debug".to_string();
    }
    logging::init(&config.logging)?;
    tracing::debug!("Using config {:?}", config);

    match cli.command {
        Command::Search => {
            let client = OpenMeteoClient::new(&config)?;
            let state = SearchState::from_config(&config.search);
            let stdin = tokio::io::BufReader::new(tokio::io::stdin());
            repl::run(&client, state, stdin, std::io::stdout()).await?;
        }
        Command::Suggest { text } => {
            let client = OpenMeteoClient::new(&config)?;
            for suggestion in client.suggest(&text).await? {
                println!("{} ({})", suggestion.name, suggestion.subtext());
            }
        }
        Command::Lookup { name } => {
            let client = OpenMeteoClient::new(&config)?;
            match resolve_and_fetch(&client, &name).await {
                Ok(card) => println!("{card}"),
                Err(e) => {
                    eprintln!("{}", e.user_message());
                    return Err(e.into());
                }
            }
        }
        Command::Serve { port } => {
            web::run(&config, port.unwrap_or(config.server.port)).await?;
        }
    }

    Ok(())
}
