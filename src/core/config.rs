use crate::core::alphabet::Alphabet;
use crate::core::codec::{self, Codec, DecodeOptions};
use crate::encoders::algorithms::errors::TranscodeError;
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::OnceLock;
use tracing::{debug, warn};

const BUILTIN_ALPHABETS: &str = include_str!("../../alphabets.toml");

static BUILTIN_REGISTRY: OnceLock<AlphabetRegistry> = OnceLock::new();

/// Configuration for a single named alphabet loaded from TOML.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct AlphabetConfig {
    /// The 64 symbols, index 0 first
    pub chars: String,
    /// Padding terminator; empty or absent means unpadded
    #[serde(default)]
    pub padding: Option<String>,
    /// Alternative names that resolve to this alphabet
    #[serde(default)]
    pub aliases: Vec<String>,
}

impl AlphabetConfig {
    /// Builds and validates the alphabet, optionally overriding the terminator.
    pub fn build(&self, terminator: Option<&str>) -> Result<Alphabet, TranscodeError> {
        let terminator = terminator.or(self.padding.as_deref()).unwrap_or("");
        Alphabet::from_strs(&self.chars, terminator)
    }
}

/// Global settings. Unset fields fall back to the library defaults.
#[derive(Debug, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct Settings {
    /// Alphabet used when none is given on the command line
    #[serde(default)]
    pub default_alphabet: Option<String>,
    /// Bytes searched from the end of a buffer for a padded final group
    #[serde(default)]
    pub tail_lookback: Option<usize>,
    /// Read size for streaming decode
    #[serde(default)]
    pub chunk_size: Option<usize>,
}

impl Settings {
    pub fn default_alphabet(&self) -> &str {
        self.default_alphabet.as_deref().unwrap_or("base64")
    }

    pub fn decode_options(&self) -> DecodeOptions {
        let defaults = DecodeOptions::default();
        DecodeOptions {
            tail_lookback: self.tail_lookback.unwrap_or(defaults.tail_lookback),
            chunk_size: self.chunk_size.unwrap_or(defaults.chunk_size).max(1),
        }
    }

    fn merge(&mut self, other: Settings) {
        if other.default_alphabet.is_some() {
            self.default_alphabet = other.default_alphabet;
        }
        if other.tail_lookback.is_some() {
            self.tail_lookback = other.tail_lookback;
        }
        if other.chunk_size.is_some() {
            self.chunk_size = other.chunk_size;
        }
    }
}

/// Collection of named alphabets loaded from TOML files.
#[derive(Debug, Deserialize, Default)]
pub struct AlphabetRegistry {
    /// Map of alphabet names to their configurations
    #[serde(default)]
    pub alphabets: HashMap<String, AlphabetConfig>,
    /// Global settings
    #[serde(default)]
    pub settings: Settings,
}

impl AlphabetRegistry {
    /// Parses alphabet configurations from TOML content.
    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Loads the built-in alphabet configurations.
    pub fn load_default() -> Result<Self, Box<dyn std::error::Error>> {
        Ok(Self::from_toml(BUILTIN_ALPHABETS)?)
    }

    /// The built-in registry, parsed once and shared. Backs
    /// [`select_alphabet`](crate::select_alphabet).
    pub fn builtin() -> &'static AlphabetRegistry {
        BUILTIN_REGISTRY.get_or_init(|| {
            Self::from_toml(BUILTIN_ALPHABETS).unwrap_or_else(|e| {
                warn!(error = %e, "built-in alphabets failed to parse");
                AlphabetRegistry::default()
            })
        })
    }

    /// Loads configuration from a custom file path.
    pub fn load_from_file(path: &std::path::Path) -> Result<Self, Box<dyn std::error::Error>> {
        let content = std::fs::read_to_string(path)?;
        Ok(Self::from_toml(&content)?)
    }

    /// Loads configuration with user overrides from standard locations.
    ///
    /// Searches in priority order:
    /// 1. Built-in alphabets (from library)
    /// 2. `~/.config/base64-scan/alphabets.toml` (user overrides)
    /// 3. `./alphabets.toml` (project-local overrides)
    ///
    /// Later configurations override earlier ones for matching alphabet names.
    /// Files that fail to load are skipped with a warning.
    pub fn load_with_overrides() -> Result<Self, Box<dyn std::error::Error>> {
        let mut config = Self::load_default()?;

        if let Some(config_dir) = dirs::config_dir() {
            let user_config_path = config_dir.join("base64-scan").join("alphabets.toml");
            config.merge_file_if_exists(&user_config_path);
        }

        config.merge_file_if_exists(std::path::Path::new("alphabets.toml"));

        Ok(config)
    }

    fn merge_file_if_exists(&mut self, path: &std::path::Path) {
        if !path.exists() {
            return;
        }
        match Self::load_from_file(path) {
            Ok(other) => {
                debug!(path = %path.display(), alphabets = other.alphabets.len(), "merged alphabet overrides");
                self.merge(other);
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "failed to load alphabet config");
            }
        }
    }

    /// Merges another configuration into this one.
    ///
    /// Alphabets from `other` override alphabets with the same name in `self`;
    /// settings present in `other` override those in `self`.
    pub fn merge(&mut self, other: AlphabetRegistry) {
        for (name, alphabet) in other.alphabets {
            self.alphabets.insert(name, alphabet);
        }
        self.settings.merge(other.settings);
    }

    /// Retrieves an alphabet configuration by name or alias.
    ///
    /// Direct names win over aliases. Among aliases, the alphabet whose name
    /// sorts first wins, so lookups are deterministic.
    pub fn get_alphabet(&self, name: &str) -> Option<(&str, &AlphabetConfig)> {
        if let Some((key, config)) = self.alphabets.get_key_value(name) {
            return Some((key.as_str(), config));
        }
        self.alphabets
            .iter()
            .filter(|(_, config)| config.aliases.iter().any(|a| a == name))
            .min_by(|(a, _), (b, _)| a.cmp(b))
            .map(|(key, config)| (key.as_str(), config))
    }

    /// Sorted alphabet names, aliases excluded.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.alphabets.keys().cloned().collect();
        names.sort();
        names
    }

    fn names_and_aliases(&self) -> Vec<String> {
        let mut all = self.names();
        for config in self.alphabets.values() {
            all.extend(config.aliases.iter().cloned());
        }
        all
    }

    /// Selects an alphabet by registered name, alias, or explicit symbols.
    ///
    /// `terminator` follows [`select_alphabet`](crate::select_alphabet):
    /// `None` keeps the configured padding (`=` for explicit symbols).
    /// The returned codec carries the registry's decode settings.
    pub fn select(
        &self,
        name_or_symbols: &str,
        terminator: Option<&str>,
    ) -> Result<Codec, TranscodeError> {
        let codec = match self.get_alphabet(name_or_symbols) {
            Some((_, config)) => Codec::new(config.build(terminator)?),
            None => codec::custom_alphabet(name_or_symbols, terminator, self.names_and_aliases())?,
        };
        let codec = codec.with_options(self.settings.decode_options());

        debug!(
            alphabet = %codec.alphabet().symbols_str(),
            terminator = %codec.alphabet().terminator_str(),
            scan = %codec.alphabet().scan_pattern().slot_class(),
            "selected alphabet"
        );
        Ok(codec)
    }
}
