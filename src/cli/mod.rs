mod args;
mod config;
mod global;
mod handlers;

use args::{AlphabetsArgs, ConfigAction, DecodeArgs, EncodeArgs};
use clap::{Parser, Subcommand};
use global::GlobalArgs;

#[derive(Parser)]
#[command(name = "base64-scan")]
#[command(version)]
#[command(about = "Garbage-tolerant base64 encoder and decoder with custom alphabets", long_about = None)]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Encode binary data as base64 text
    Encode(EncodeArgs),

    /// Decode base64 text, skipping anything outside the alphabet
    Decode(DecodeArgs),

    /// List available alphabets
    Alphabets(AlphabetsArgs),

    /// Inspect alphabet configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    cli.global.init_tracing();

    // Load alphabets with user overrides
    let registry = config::load_registry(&cli.global)?;

    match cli.command {
        Commands::Encode(args) => handlers::encode::handle(args, &registry),
        Commands::Decode(args) => handlers::decode::handle(args, &cli.global, &registry),
        Commands::Alphabets(args) => handlers::alphabets::handle(args, &registry),
        Commands::Config { action } => handlers::config::handle(action, &registry),
    }
}
