mod aggregator;
mod api_client;
mod client;
mod cmd;
mod config;
mod error;
mod policy;
mod pool;
mod registry;
mod target;
mod types;

use clap::Parser;
use dotenv::dotenv;
use tracing::Level;

use crate::cmd::Cmd;
use crate::config::ConfigArgs;

/// Probe a sequential team API and print the deduplicated rosters of the
/// target teams, sorted by player name.
#[derive(Parser, Debug)]
#[command(name = "rosterprobe", version, about)]
struct Cli {
    #[command(flatten)]
    config: ConfigArgs,

    /// debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// only log warnings
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    #[command(subcommand)]
    cmd: Option<Cmd>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env must be loaded before parsing so it feeds the env fallbacks
    dotenv().ok();
    let cli = Cli::parse();

    let level = match (cli.verbose, cli.quiet) {
        (true, _) => Level::DEBUG,
        (_, true) => Level::WARN,
        _ => Level::INFO,
    };
    // stdout carries the roster
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(level)
        .init();

    let config = cli.config.load()?;
    cli.cmd.unwrap_or(Cmd::Roster).run(config).await
}
