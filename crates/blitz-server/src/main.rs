mod config;
mod discovery;
mod dispatch;
mod listing;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

use crate::config::Config;

#[derive(Parser)]
#[command(name = "blitz-server")]
#[command(version, about = "File-system route resolution for Blitz projects", long_about = None)]
struct Cli {
    /// Path to the configuration file
    #[arg(short, long, default_value = "blitz.toml", global = true)]
    config: PathBuf,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the route table over HTTP (default)
    Start {
        /// Port to run the server on (overrides config and BLITZ_PORT)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Print discovered routes in precedence order
    Routes,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let config = Config::load(&cli.config)?.with_env_overrides(|key| std::env::var(key).ok());
    let table = discovery::discover(&config.routing)?;

    match cli.command.unwrap_or(Commands::Start { port: None }) {
        Commands::Start { port } => start(config, table, port).await,
        Commands::Routes => {
            listing::print(&table);
            Ok(())
        }
    }
}

async fn start(mut config: Config, table: blitz_router::RouteTable, port: Option<u16>) -> Result<()> {
    if let Some(port) = port {
        config.server.port = port;
    }

    println!("{}", "blitz-server starting...".bold());
    listing::print(&table);

    let app = dispatch::app(Arc::new(table));

    let addr = config.address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    info!(%addr, root = %config.routing.root, "listening");
    println!("Server running at {}", format!("http://{}", addr).cyan());

    axum::serve(listener, app).await.context("Server error")?;
    Ok(())
}
