//! sheetwatch CLI

use anyhow::Result;
use clap::{Parser, Subcommand};
use cli_lib::Config;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod cmd;

/// Sheetwatch - regenerate HTML whenever the project spreadsheets change
#[derive(Parser)]
#[command(name = "sheetwatch")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Config file (default: ./sheetwatch.toml if present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Watch the spreadsheets and serve the HTTP triggers (default)
    Serve {
        /// Address to bind (overrides server.host)
        #[arg(long)]
        host: Option<String>,
        /// Port to bind (overrides server.port)
        #[arg(short, long)]
        port: Option<u16>,
        /// Serve HTTP only, without watching files
        #[arg(long)]
        no_watch: bool,
    },
    /// Regenerate the HTML output once and exit
    Generate,
    /// Run the project initialization script once and exit
    Init,
    /// Show the effective configuration
    Config,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing (RUST_LOG overrides the default level)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let (config, source) = Config::resolve(cli.config.as_deref())?;

    let command = cli.command.unwrap_or(Commands::Serve {
        host: None,
        port: None,
        no_watch: false,
    });

    match command {
        Commands::Serve { host, port, no_watch } => {
            cmd::serve::run(config, host, port, no_watch).await
        }
        Commands::Generate => cmd::generate::run(&config).await,
        Commands::Init => cmd::init::run(&config).await,
        Commands::Config => cmd::config::run(&config, source.as_deref()).await,
    }
}
