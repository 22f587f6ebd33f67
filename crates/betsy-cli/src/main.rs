//! CLI application for Betsy CRM order management.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use commands::{config, decode, orders, parse, stats, submit, total, GlobalOptions};

/// Betsy CRM - sales intake and order tracking from the terminal
#[derive(Parser)]
#[command(name = "betsy")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Script endpoint URL, overrides the config file
    #[arg(long, global = true)]
    script_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract customer fields from pasted text
    Parse(parse::ParseArgs),

    /// Decode a saved sales list body
    Decode(decode::DecodeArgs),

    /// Compute IVA and total of an order
    Total(total::TotalArgs),

    /// List orders from the endpoint
    List(orders::ListArgs),

    /// Refresh the order list periodically
    Watch(orders::WatchArgs),

    /// Register a new sale
    Submit(submit::SubmitArgs),

    /// Change the workflow status of an order
    Status(orders::StatusArgs),

    /// Edit fields of an order
    Update(orders::UpdateArgs),

    /// Show sales statistics
    Stats(stats::StatsArgs),

    /// Manage configuration
    Config(config::ConfigArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    let options = GlobalOptions {
        config_path: cli.config,
        script_url: cli.script_url,
    };

    // Execute command
    match cli.command {
        Commands::Parse(args) => parse::run(args, &options).await,
        Commands::Decode(args) => decode::run(args).await,
        Commands::Total(args) => total::run(args, &options).await,
        Commands::List(args) => orders::list(args, &options).await,
        Commands::Watch(args) => orders::watch(args, &options).await,
        Commands::Submit(args) => submit::run(args, &options).await,
        Commands::Status(args) => orders::status(args, &options).await,
        Commands::Update(args) => orders::update(args, &options).await,
        Commands::Stats(args) => stats::run(args, &options).await,
        Commands::Config(args) => config::run(args, &options).await,
    }
}
