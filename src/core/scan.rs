use std::fmt;

/// How the decoder treats a single input byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolClass {
    /// One of the 64 alphabet symbols.
    Symbol,
    /// The padding terminator.
    Terminator,
    /// Anything else: whitespace, line breaks, punctuation, binary noise.
    Ignorable,
}

/// Per-byte classification derived from an alphabet and its terminator.
///
/// The decode engine uses this to pull the next useful symbol out of noisy
/// input. Conceptually it is three character classes: "symbol",
/// "symbol or terminator" and "ignorable".
#[derive(Clone, PartialEq, Eq)]
pub struct ScanPattern {
    classes: [SymbolClass; 256],
}

impl ScanPattern {
    /// Builds the pattern for `symbols` plus an optional terminator.
    ///
    /// Callers are expected to have validated the alphabet already; a
    /// terminator that also appears in `symbols` is classified as a symbol.
    pub fn new(symbols: &[u8], terminator: Option<u8>) -> Self {
        let mut classes = [SymbolClass::Ignorable; 256];
        if let Some(t) = terminator {
            classes[t as usize] = SymbolClass::Terminator;
        }
        for &s in symbols {
            classes[s as usize] = SymbolClass::Symbol;
        }
        ScanPattern { classes }
    }

    #[inline]
    pub fn class_of(&self, byte: u8) -> SymbolClass {
        self.classes[byte as usize]
    }

    #[inline]
    pub fn is_symbol(&self, byte: u8) -> bool {
        self.classes[byte as usize] == SymbolClass::Symbol
    }

    #[inline]
    pub fn is_slot(&self, byte: u8) -> bool {
        self.classes[byte as usize] != SymbolClass::Ignorable
    }

    #[inline]
    pub fn is_ignorable(&self, byte: u8) -> bool {
        self.classes[byte as usize] == SymbolClass::Ignorable
    }

    /// Renders the symbol class as a regex-style bracket expression,
    /// collapsing consecutive byte values into ranges (`[+/-9A-Za-z]`).
    pub fn symbol_class(&self) -> String {
        self.render(|c| c == SymbolClass::Symbol)
    }

    /// Same as [`symbol_class`](Self::symbol_class) but including the terminator.
    pub fn slot_class(&self) -> String {
        self.render(|c| c != SymbolClass::Ignorable)
    }

    fn render(&self, include: impl Fn(SymbolClass) -> bool) -> String {
        let mut out = String::from("[");
        let mut byte = 0usize;
        while byte < 256 {
            if !include(self.classes[byte]) {
                byte += 1;
                continue;
            }
            let start = byte;
            while byte + 1 < 256 && include(self.classes[byte + 1]) {
                byte += 1;
            }
            push_class_byte(&mut out, start as u8);
            if byte - start >= 2 {
                out.push('-');
            }
            if byte > start {
                push_class_byte(&mut out, byte as u8);
            }
            byte += 1;
        }
        out.push(']');
        out
    }
}

fn push_class_byte(out: &mut String, byte: u8) {
    match byte {
        b'\\' | b']' | b'[' | b'^' | b'-' => {
            out.push('\\');
            out.push(byte as char);
        }
        0x21..=0x7e => out.push(byte as char),
        _ => out.push_str(&format!("\\x{:02x}", byte)),
    }
}

impl fmt::Debug for ScanPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScanPattern")
            .field("symbols", &self.symbol_class())
            .field("slots", &self.slot_class())
            .finish()
    }
}
