use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod config;

#[derive(Parser)]
#[command(name = "soilmate", about = "Find the plant that matches your personality")]
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
    /// Manage configuration
    Config(commands::config::ConfigArgs),
    /// Match answers given as arguments
    Match(commands::matching::MatchArgs),
    /// Take the quiz interactively
    Quiz(commands::quiz::QuizArgs),
    /// Run the soilmate server
    Serve(commands::serve::ServeArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match cli.command {
        Commands::Config(args) => commands::config::run(args),
        Commands::Match(args) => commands::matching::run(args),
        Commands::Quiz(args) => commands::quiz::run(args),
        Commands::Serve(args) => commands::serve::run(args).await,
    }
}
