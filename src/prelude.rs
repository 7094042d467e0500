//! Convenient re-exports for common usage.
//!
//! # Example
//!
//! ```
//! use base64_scan::prelude::*;
//!
//! let registry = AlphabetRegistry::load_default().unwrap();
//! let codec = registry.select("base64url", None).unwrap();
//! assert_eq!(encode(b"\xfb\xff", &codec).unwrap(), "-_8=");
//! ```

pub use crate::{
    Alphabet,
    AlphabetRegistry,
    Codec,
    // Streaming
    DecodedChunks,
    EncodedChunks,
    Input,
    Invocation,
    Sink,
    StreamingDecoder,
    StreamingEncoder,
    // Errors
    TranscodeError,
    decode,
    encode,
    select_alphabet,
};
