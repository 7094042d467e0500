//! Garbage-tolerant base64 transcoding.
//!
//! Encodes bytes with the standard, URL-safe, or any custom 64-symbol
//! alphabet, and decodes text that may be littered with whitespace, line
//! breaks, or other bytes outside the alphabet. Both directions work on whole
//! buffers or in bounded memory over any [`std::io::Read`].
//!
//! # Example
//!
//! ```
//! use base64_scan::{decode, encode, select_alphabet};
//!
//! let codec = select_alphabet("base64", None).unwrap();
//! assert_eq!(encode(b"This is a string", &codec).unwrap(), "VGhpcyBpcyBhIHN0cmluZw==");
//! assert_eq!(decode("V 2 h h d C Bp\ncy B0aGlzPwo=", &codec), b"What is this?\n");
//! ```

mod core;
mod encoders;
mod invocation;

pub mod prelude;

pub use crate::core::alphabet::{Alphabet, STANDARD_SYMBOLS, URL_SAFE_SYMBOLS};
pub use crate::core::codec::{Codec, DEFAULT_CHUNK_SIZE, DecodeOptions, select_alphabet};
pub use crate::core::config::{AlphabetConfig, AlphabetRegistry, Settings};
pub use crate::core::scan::{ScanPattern, SymbolClass};
pub use crate::encoders::algorithms::decode::{
    DEFAULT_TAIL_LOOKBACK, PaddedTail, StreamScanner, decoded_len_estimate, find_padded_tail,
};
pub use crate::encoders::algorithms::encode::{GroupSource, Residue, SliceGroups, encoded_len};
pub use crate::encoders::algorithms::{
    AlphabetProblem, TerminatorProblem, TranscodeError, find_closest_alphabet,
};
pub use crate::encoders::sink::{FnSink, Sink, WriteSink};
pub use crate::encoders::streaming::{
    DecodedChunks, EncodedChunks, ReaderGroups, StreamingDecoder, StreamingEncoder,
};
pub use crate::invocation::{Input, Invocation};

/// Encodes binary data as text with the codec's alphabet.
///
/// Fails only for alphabets with symbols above `0x7F`; see
/// [`Codec::encode_bytes`].
pub fn encode(data: &[u8], codec: &Codec) -> Result<String, TranscodeError> {
    codec.encode(data)
}

/// Decodes possibly noisy base64 text with the codec's alphabet.
///
/// Bytes outside the alphabet are skipped, so this never fails.
pub fn decode(encoded: impl AsRef<[u8]>, codec: &Codec) -> Vec<u8> {
    codec.decode(encoded)
}
