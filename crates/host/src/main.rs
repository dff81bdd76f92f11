//! rivebridge - Bridge a reply engine to a UI over typed ports
//!
//! Usage:
//!   rivebridge check -f brain.rive      - Load knowledge and report the batch
//!   rivebridge serve -d brain/          - JSON-lines requests on stdin, replies on stdout
//!   rivebridge chat -c rivebridge.json  - Interactive conversation

use clap::{Parser, Subcommand};
use host::commands::{ChatCommand, CheckCommand, ServeCommand};

#[derive(Parser)]
#[command(name = "rivebridge")]
#[command(about = "rivebridge - Reply engine to UI bridge")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load knowledge and report the outcome
    Check(CheckCommand),
    /// Serve JSON-lines requests over stdin/stdout
    Serve(ServeCommand),
    /// Chat interactively
    Chat(ChatCommand),
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // Initialize logging; stdout carries replies, so logs go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Check(cmd) => cmd.run().await,
        Commands::Serve(cmd) => cmd.run().await,
        Commands::Chat(cmd) => cmd.run().await,
    }
}
