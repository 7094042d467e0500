use crate::core::alphabet::Alphabet;
use crate::core::config::AlphabetRegistry;
use crate::encoders::algorithms::decode::{self, DEFAULT_TAIL_LOOKBACK};
use crate::encoders::algorithms::encode::{self, GroupSource, SliceGroups};
use crate::encoders::algorithms::errors::{TranscodeError, find_closest_alphabet};
use crate::encoders::sink::{Sink, TextSink};
use crate::encoders::streaming::{DecodedChunks, EncodedChunks, ReaderGroups};
use std::io::{self, Read};
use std::sync::Arc;

/// Default read size for streaming decode.
pub const DEFAULT_CHUNK_SIZE: usize = 2048;

/// Tuning knobs that do not change the alphabet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeOptions {
    /// How many trailing bytes buffer-mode decoding searches for a padded
    /// final group. See [`decode::find_padded_tail`].
    pub tail_lookback: usize,
    /// Bytes read per pull by the streaming adapters.
    pub chunk_size: usize,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        DecodeOptions {
            tail_lookback: DEFAULT_TAIL_LOOKBACK,
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }
}

/// An immutable alphabet plus options, passed to every encode/decode call.
///
/// Cloning is cheap (the tables are shared). Since nothing is global, a
/// different `Codec` can be built at any time without affecting operations
/// already running with another one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Codec {
    alphabet: Arc<Alphabet>,
    options: DecodeOptions,
}

impl Codec {
    pub fn new(alphabet: Alphabet) -> Self {
        Codec {
            alphabet: Arc::new(alphabet),
            options: DecodeOptions::default(),
        }
    }

    pub fn standard() -> Self {
        Self::new(Alphabet::standard())
    }

    pub fn url_safe() -> Self {
        Self::new(Alphabet::url_safe())
    }

    pub fn with_options(mut self, options: DecodeOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_tail_lookback(mut self, lookback: usize) -> Self {
        self.options.tail_lookback = lookback;
        self
    }

    /// Sets the streaming read size; zero is bumped to one.
    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.options.chunk_size = chunk_size.max(1);
        self
    }

    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    pub fn options(&self) -> DecodeOptions {
        self.options
    }

    /// The effective `(alphabet, terminator)` pair, for introspection.
    pub fn selection(&self) -> (String, String) {
        (self.alphabet.symbols_str(), self.alphabet.terminator_str())
    }

    /// Encodes a buffer into a string.
    ///
    /// # Errors
    ///
    /// `UnsupportedInvocation` when the alphabet has symbols above `0x7F`;
    /// use [`encode_bytes`](Self::encode_bytes) for those.
    pub fn encode(&self, data: &[u8]) -> Result<String, TranscodeError> {
        if !self.alphabet.is_ascii() {
            return Err(TranscodeError::UnsupportedInvocation(
                "alphabet has non-ASCII symbols, encode to bytes instead",
            ));
        }
        let mut sink = TextSink(String::with_capacity(self.encoded_len(data.len())));
        self.encode_to(data, &mut sink)?;
        Ok(sink.0)
    }

    /// Encodes a buffer into raw symbol bytes. Works with every alphabet.
    pub fn encode_bytes(&self, data: &[u8]) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.encoded_len(data.len()));
        // Vec sink never fails
        let _ = self.encode_to(data, &mut out);
        out
    }

    fn encoded_len(&self, input_len: usize) -> usize {
        encode::encoded_len(input_len, self.alphabet.terminator().is_some())
    }

    /// Encodes a buffer, pushing 4-symbol chunks into `sink`.
    pub fn encode_to<K: Sink + ?Sized>(&self, data: &[u8], sink: &mut K) -> io::Result<()> {
        encode::encode(&self.alphabet, &mut SliceGroups::new(data), sink)
    }

    /// Encodes from any group source.
    pub fn encode_source<S, K>(&self, source: &mut S, sink: &mut K) -> io::Result<()>
    where
        S: GroupSource + ?Sized,
        K: Sink + ?Sized,
    {
        encode::encode(&self.alphabet, source, sink)
    }

    /// Encodes everything `reader` yields, 3 bytes at a time.
    pub fn encode_reader<R: Read, K: Sink + ?Sized>(&self, reader: R, sink: &mut K) -> io::Result<()> {
        encode::encode(&self.alphabet, &mut ReaderGroups::new(reader), sink)
    }

    /// Decodes a buffer of possibly noisy text. Never fails.
    pub fn decode(&self, input: impl AsRef<[u8]>) -> Vec<u8> {
        let input = input.as_ref();
        let mut out = Vec::with_capacity(decode::decoded_len_estimate(input.len()));
        // Vec sink never fails
        let _ = self.decode_to(input, &mut out);
        out
    }

    /// Decodes a buffer, pushing 3-byte chunks into `sink`.
    pub fn decode_to<K: Sink + ?Sized>(&self, input: &[u8], sink: &mut K) -> io::Result<()> {
        decode::decode_buffer(&self.alphabet, input, self.options.tail_lookback, sink)
    }

    /// Decodes everything `reader` yields in bounded memory.
    pub fn decode_reader<R: Read, K: Sink + ?Sized>(&self, reader: R, sink: &mut K) -> io::Result<()> {
        for chunk in self.decoded_chunks(reader) {
            let chunk = chunk?;
            if !chunk.is_empty() {
                sink.accept(&chunk)?;
            }
        }
        Ok(())
    }

    /// Lazy iterator of encoded text, one item per input chunk.
    pub fn encoded_chunks<R: Read>(&self, reader: R) -> EncodedChunks<R> {
        EncodedChunks::new(self.clone(), reader)
    }

    /// Lazy iterator of decoded bytes, one item per input chunk.
    pub fn decoded_chunks<R: Read>(&self, reader: R) -> DecodedChunks<R> {
        DecodedChunks::new(self.clone(), reader)
    }
}

impl Default for Codec {
    fn default() -> Self {
        Self::standard()
    }
}

/// Selects a built-in alphabet by name or alias, or builds one from explicit
/// symbols.
///
/// # Arguments
///
/// * `name_or_symbols` - a name from the built-in registry (`base64`,
///   `base64url`, `crypt`, `imap` or one of their aliases), or a string of
///   exactly 64 ASCII symbols
/// * `terminator` - `None` keeps the alphabet's configured padding (`=` for
///   explicit symbols), `Some("")` disables padding, `Some("x")` uses `x`
///
/// # Errors
///
/// `InvalidAlphabet` for an unknown name or a malformed symbol set,
/// `InvalidTerminator` for a bad terminator.
///
/// # Example
///
/// ```
/// let codec = base64_scan::select_alphabet("base64url", None).unwrap();
/// assert_eq!(codec.encode(b"\xfb\xff").unwrap(), "-_8=");
/// ```
pub fn select_alphabet(
    name_or_symbols: &str,
    terminator: Option<&str>,
) -> Result<Codec, TranscodeError> {
    AlphabetRegistry::builtin().select(name_or_symbols, terminator)
}

/// Names are short identifiers; anything at least this long is taken as an
/// attempted symbol set when it is not exactly 64 bytes.
const SYMBOL_SET_THRESHOLD: usize = 32;

/// Builds a codec from an explicit symbol string, or reports an unknown name.
pub(crate) fn custom_alphabet(
    symbols: &str,
    terminator: Option<&str>,
    known_names: Vec<String>,
) -> Result<Codec, TranscodeError> {
    if symbols.len() == 64 || symbols.len() >= SYMBOL_SET_THRESHOLD {
        let alphabet = Alphabet::from_strs(symbols, terminator.unwrap_or("="))?;
        return Ok(Codec::new(alphabet));
    }
    let suggestion = find_closest_alphabet(symbols, &known_names);
    Err(TranscodeError::unknown_alphabet(symbols, suggestion))
}
