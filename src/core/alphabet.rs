use crate::core::scan::ScanPattern;
use crate::encoders::algorithms::errors::{AlphabetProblem, TerminatorProblem, TranscodeError};
use std::fmt;

/// Marker in the reverse table for bytes that are not alphabet symbols.
pub const INVALID: u8 = 0xFF;

/// The RFC 2045 / RFC 4648 section 4 symbol set.
pub const STANDARD_SYMBOLS: &[u8; 64] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+/";

/// The RFC 4648 section 5 URL and filename safe symbol set.
pub const URL_SAFE_SYMBOLS: &[u8; 64] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789-_";

/// A validated 64-symbol alphabet with its optional terminator and all the
/// tables derived from it.
///
/// Construction is the only place validation happens. Once built, an
/// `Alphabet` is immutable; the tables are a pure function of the symbols and
/// terminator, so two alphabets built from the same input compare equal.
#[derive(Clone, PartialEq, Eq)]
pub struct Alphabet {
    encode_table: [u8; 64],
    decode_table: [u8; 256],
    terminator: Option<u8>,
    scan: ScanPattern,
}

impl Alphabet {
    /// Creates an alphabet from exactly 64 distinct byte values.
    ///
    /// Any byte may be a symbol, including those above `0x7F`. Such an
    /// alphabet encodes to bytes only (see [`Codec::encode_bytes`](crate::Codec::encode_bytes)).
    ///
    /// # Arguments
    ///
    /// * `symbols` - The 64 output symbols, index 0 first
    /// * `terminator` - Zero or one padding symbol; empty disables padding
    ///
    /// # Errors
    ///
    /// Returns `InvalidAlphabet` if the symbol count is wrong or a symbol
    /// repeats. Returns `InvalidTerminator` if the terminator is longer than
    /// one byte or collides with a symbol.
    pub fn new(symbols: &[u8], terminator: &[u8]) -> Result<Self, TranscodeError> {
        if symbols.len() != 64 {
            return Err(TranscodeError::InvalidAlphabet(AlphabetProblem::WrongLength(
                symbols.len(),
            )));
        }

        let mut encode_table = [0u8; 64];
        let mut decode_table = [INVALID; 256];
        for (index, &symbol) in symbols.iter().enumerate() {
            if decode_table[symbol as usize] != INVALID {
                return Err(TranscodeError::InvalidAlphabet(AlphabetProblem::Duplicate(symbol)));
            }
            decode_table[symbol as usize] = index as u8;
            encode_table[index] = symbol;
        }

        let terminator = match terminator {
            [] => None,
            [t] if decode_table[*t as usize] != INVALID => {
                return Err(TranscodeError::InvalidTerminator(TerminatorProblem::Collides(*t)));
            }
            [t] => Some(*t),
            more => {
                return Err(TranscodeError::InvalidTerminator(TerminatorProblem::TooLong(
                    more.len(),
                )));
            }
        };

        Ok(Alphabet {
            encode_table,
            decode_table,
            terminator,
            scan: ScanPattern::new(symbols, terminator),
        })
    }

    /// Creates an alphabet from string slices.
    ///
    /// Text input is limited to ASCII, so each character is one symbol. A
    /// multi-byte character shows up as its first byte in the resulting
    /// `NonAscii` error.
    pub fn from_strs(symbols: &str, terminator: &str) -> Result<Self, TranscodeError> {
        if let Some(b) = symbols.bytes().find(|b| !b.is_ascii()) {
            return Err(TranscodeError::InvalidAlphabet(AlphabetProblem::NonAscii(b)));
        }
        if let Some(b) = terminator.bytes().find(|b| !b.is_ascii()) {
            return Err(TranscodeError::InvalidTerminator(TerminatorProblem::NonAscii(b)));
        }
        Self::new(symbols.as_bytes(), terminator.as_bytes())
    }

    /// The standard alphabet, padded with `=`.
    pub fn standard() -> Self {
        Self::builtin(STANDARD_SYMBOLS, Some(b'='))
    }

    /// The URL-safe alphabet, padded with `=`.
    pub fn url_safe() -> Self {
        Self::builtin(URL_SAFE_SYMBOLS, Some(b'='))
    }

    fn builtin(symbols: &[u8; 64], terminator: Option<u8>) -> Self {
        let mut decode_table = [INVALID; 256];
        for (index, &symbol) in symbols.iter().enumerate() {
            decode_table[symbol as usize] = index as u8;
        }
        Alphabet {
            encode_table: *symbols,
            decode_table,
            terminator,
            scan: ScanPattern::new(symbols, terminator),
        }
    }

    /// Returns a copy of this alphabet with a different terminator.
    pub fn with_terminator(&self, terminator: &[u8]) -> Result<Self, TranscodeError> {
        Self::new(&self.encode_table, terminator)
    }

    /// Forward lookup: 6-bit index to output symbol.
    #[inline]
    pub fn encode_index(&self, index: u8) -> u8 {
        self.encode_table[(index & 0x3F) as usize]
    }

    /// Reverse lookup: symbol to 6-bit index, or `None` for non-members.
    #[inline]
    pub fn decode_symbol(&self, symbol: u8) -> Option<u8> {
        match self.decode_table[symbol as usize] {
            INVALID => None,
            index => Some(index),
        }
    }

    #[inline]
    pub(crate) fn decode_table(&self) -> &[u8; 256] {
        &self.decode_table
    }

    pub fn symbols(&self) -> &[u8; 64] {
        &self.encode_table
    }

    pub fn terminator(&self) -> Option<u8> {
        self.terminator
    }

    pub fn scan_pattern(&self) -> &ScanPattern {
        &self.scan
    }

    /// True when every symbol and the terminator are 7-bit ASCII, so the
    /// encoded output is valid text.
    pub fn is_ascii(&self) -> bool {
        self.encode_table.is_ascii() && self.terminator.is_none_or(|t| t.is_ascii())
    }

    /// The symbols as text. Bytes above `0x7F` show as their Latin-1
    /// characters.
    pub fn symbols_str(&self) -> String {
        self.encode_table.iter().map(|&b| char::from(b)).collect()
    }

    /// The terminator as text, empty when padding is disabled.
    pub fn terminator_str(&self) -> String {
        self.terminator.map(char::from).map(String::from).unwrap_or_default()
    }
}

impl Default for Alphabet {
    fn default() -> Self {
        Self::standard()
    }
}

impl fmt::Debug for Alphabet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Alphabet")
            .field("symbols", &self.symbols_str())
            .field("terminator", &self.terminator_str())
            .finish()
    }
}
