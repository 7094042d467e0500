use base64_scan::{AlphabetRegistry, Codec, TranscodeError};
use std::fs;
use std::io::{self, BufWriter, Read, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

use super::args::AlphabetArgs;
use super::global::GlobalArgs;

/// Expands `~` in a user-supplied path.
fn expand_path(path: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(path).as_ref())
}

/// Loads the built-in alphabets, user overrides, and the `--config` file.
///
/// Unlike the override files, an explicit `--config` file that cannot be
/// read or parsed is an error.
pub fn load_registry(global: &GlobalArgs) -> Result<AlphabetRegistry, Box<dyn std::error::Error>> {
    let mut registry = AlphabetRegistry::load_with_overrides()?;

    if let Some(path) = &global.config {
        let expanded = expand_path(path);
        let extra = AlphabetRegistry::load_from_file(&expanded)
            .map_err(|e| format!("Cannot load config '{}': {}", expanded.display(), e))?;
        debug!(path = %expanded.display(), "merged --config file");
        registry.merge(extra);
    }

    Ok(registry)
}

/// Builds the codec for a subcommand from its `-a`/`-t` flags.
pub fn create_codec(
    registry: &AlphabetRegistry,
    args: &AlphabetArgs,
) -> Result<Codec, TranscodeError> {
    let name = args
        .alphabet
        .as_deref()
        .unwrap_or_else(|| registry.settings.default_alphabet());
    registry.select(name, args.terminator.as_deref())
}

/// Opens the input file, or stdin when none is given.
pub fn open_input(file: Option<&Path>) -> io::Result<Box<dyn Read>> {
    match file {
        Some(path) => Ok(Box::new(fs::File::open(path)?)),
        None => Ok(Box::new(io::stdin().lock())),
    }
}

/// Opens the output file, or stdout when none is given.
pub fn open_output(output: Option<&Path>) -> io::Result<Box<dyn Write>> {
    match output {
        Some(path) => Ok(Box::new(BufWriter::new(fs::File::create(path)?))),
        None => Ok(Box::new(io::stdout().lock())),
    }
}

