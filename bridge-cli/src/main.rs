use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod config;

#[derive(Parser)]
#[command(name = "bridge", about = "Offset-tracked consumer for the ORAM intent queue")]
#[command(version, propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Tail the intent queue and print a routing decision per event
    Consume(commands::consume::ConsumeArgs),
    /// Show the committed offset and queue lag
    Status(commands::status::StatusArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match cli.command {
        Commands::Consume(args) => commands::consume::run(args).await,
        Commands::Status(args) => commands::status::run(args).await,
    }
}
