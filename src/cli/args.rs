use clap::{Args, Subcommand};
use std::path::PathBuf;

/// Alphabet selection shared by encode and decode
#[derive(Args, Debug)]
pub struct AlphabetArgs {
    /// Alphabet name, alias, or a string of 64 symbols
    #[arg(short = 'a', long, value_name = "NAME|SYMBOLS")]
    pub alphabet: Option<String>,

    /// Padding terminator; an empty string disables padding
    #[arg(short = 't', long, value_name = "CHAR")]
    pub terminator: Option<String>,
}

/// Arguments for encoding data
#[derive(Args, Debug)]
pub struct EncodeArgs {
    /// Input file (reads from stdin if not provided)
    pub file: Option<PathBuf>,

    #[command(flatten)]
    pub alphabet: AlphabetArgs,

    /// Output file (writes to stdout if not provided)
    #[arg(short = 'o', long)]
    pub output: Option<PathBuf>,

    /// Use streaming mode for large files
    #[arg(short = 's', long)]
    pub stream: bool,
}

/// Arguments for decoding data
#[derive(Args, Debug)]
pub struct DecodeArgs {
    /// Input file (reads from stdin if not provided)
    pub file: Option<PathBuf>,

    #[command(flatten)]
    pub alphabet: AlphabetArgs,

    /// Bytes searched from the end of the input for a padded final group
    #[arg(long, value_name = "N")]
    pub lookback: Option<usize>,

    /// Output file (writes to stdout if not provided)
    #[arg(short = 'o', long)]
    pub output: Option<PathBuf>,

    /// Use streaming mode for large files
    #[arg(short = 's', long)]
    pub stream: bool,
}

/// Arguments for listing alphabets
#[derive(Args, Debug)]
pub struct AlphabetsArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Config subcommand actions
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show details for a specific alphabet
    Show {
        /// Alphabet name or alias
        alphabet: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}
