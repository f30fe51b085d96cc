//! CLI for parsing quote and invoice requests.

mod commands;

use clap::{Parser, Subcommand};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use commands::{batch, config, draft, parse};

/// devis - Turn free-text requests into quote and invoice drafts
#[derive(Parser)]
#[command(name = "devis")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a single message
    Parse(parse::ParseArgs),

    /// Parse every message file matching a pattern
    Batch(batch::BatchArgs),

    /// Seed a quote or invoice draft from a message
    Draft(draft::DraftArgs),

    /// Manage configuration
    Config(config::ConfigArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(log_filter(cli.verbose))
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        Commands::Parse(args) => parse::run(args, cli.config.as_deref()).await,
        Commands::Batch(args) => batch::run(args, cli.config.as_deref()).await,
        Commands::Draft(args) => draft::run(args, cli.config.as_deref()).await,
        Commands::Config(args) => config::run(args, cli.config.as_deref()).await,
    }
}

/// `-v` flags pick the level; without them `RUST_LOG` applies, then WARN.
fn log_filter(verbose: u8) -> EnvFilter {
    let level = match verbose {
        0 => {
            if let Ok(filter) = EnvFilter::try_from_default_env() {
                return filter;
            }
            LevelFilter::WARN
        }
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };

    EnvFilter::default().add_directive(level.into())
}
