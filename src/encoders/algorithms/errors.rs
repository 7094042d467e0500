use std::fmt;
use std::io;

/// Why an alphabet was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AlphabetProblem {
    /// The symbol set does not contain exactly 64 bytes.
    WrongLength(usize),
    /// A symbol appears more than once.
    Duplicate(u8),
    /// A symbol given as text is outside 7-bit ASCII.
    NonAscii(u8),
    /// Neither a registered name nor a 64-symbol set.
    Unknown {
        name: String,
        suggestion: Option<String>,
    },
}

/// Why a terminator was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TerminatorProblem {
    /// More than one byte was supplied.
    TooLong(usize),
    /// The terminator is also one of the 64 symbols.
    Collides(u8),
    /// A terminator given as text is outside 7-bit ASCII.
    NonAscii(u8),
}

/// Errors raised by alphabet selection and by the invocation layer.
///
/// Decoding never fails on malformed content; only configuration problems and
/// upstream I/O errors reach the caller.
#[derive(Debug)]
pub enum TranscodeError {
    InvalidAlphabet(AlphabetProblem),
    InvalidTerminator(TerminatorProblem),
    /// The caller combined argument shapes that cannot be honoured together.
    UnsupportedInvocation(&'static str),
    /// An error from a caller-supplied reader or writer, passed through as-is.
    Io(io::Error),
}

impl TranscodeError {
    pub fn unknown_alphabet(name: impl Into<String>, suggestion: Option<String>) -> Self {
        TranscodeError::InvalidAlphabet(AlphabetProblem::Unknown {
            name: name.into(),
            suggestion,
        })
    }
}

impl From<io::Error> for TranscodeError {
    fn from(err: io::Error) -> Self {
        TranscodeError::Io(err)
    }
}

fn printable(byte: u8) -> String {
    if byte.is_ascii_graphic() {
        format!("'{}'", byte as char)
    } else {
        format!("0x{:02x}", byte)
    }
}

impl fmt::Display for TranscodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let use_color = should_use_color();
        let (message, hint) = match self {
            TranscodeError::InvalidAlphabet(problem) => match problem {
                AlphabetProblem::WrongLength(n) => (
                    format!("invalid alphabet: expected 64 symbols, got {}", n),
                    Some("a custom alphabet must list exactly 64 distinct ASCII symbols".to_string()),
                ),
                AlphabetProblem::Duplicate(b) => (
                    format!("invalid alphabet: symbol {} appears more than once", printable(*b)),
                    None,
                ),
                AlphabetProblem::NonAscii(b) => (
                    format!("invalid alphabet: symbol {} is not 7-bit ASCII", printable(*b)),
                    Some("alphabets given as text take one ASCII character per symbol".to_string()),
                ),
                AlphabetProblem::Unknown { name, suggestion } => (
                    format!("alphabet '{}' not found", name),
                    Some(match suggestion {
                        Some(s) => format!(
                            "did you mean '{}'? run `base64-scan alphabets` to see all alphabets",
                            s
                        ),
                        None => "run `base64-scan alphabets` to see all alphabets".to_string(),
                    }),
                ),
            },
            TranscodeError::InvalidTerminator(problem) => match problem {
                TerminatorProblem::TooLong(n) => (
                    format!("invalid terminator: expected at most 1 symbol, got {}", n),
                    Some("pass an empty terminator to disable padding".to_string()),
                ),
                TerminatorProblem::Collides(b) => (
                    format!("invalid terminator: {} is already an alphabet symbol", printable(*b)),
                    None,
                ),
                TerminatorProblem::NonAscii(b) => (
                    format!("invalid terminator: {} is not 7-bit ASCII", printable(*b)),
                    None,
                ),
            },
            TranscodeError::UnsupportedInvocation(what) => {
                (format!("unsupported invocation: {}", what), None)
            }
            TranscodeError::Io(err) => (format!("{}", err), None),
        };

        if use_color {
            write!(f, "\x1b[1;31merror:\x1b[0m {}", message)?;
        } else {
            write!(f, "error: {}", message)?;
        }
        if let Some(hint) = hint {
            writeln!(f)?;
            if use_color {
                write!(f, "\x1b[1;36mhint:\x1b[0m {}", hint)?;
            } else {
                write!(f, "hint: {}", hint)?;
            }
        }
        Ok(())
    }
}

impl std::error::Error for TranscodeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TranscodeError::Io(err) => Some(err),
            _ => None,
        }
    }
}

/// Check if colored output should be used
fn should_use_color() -> bool {
    // Respect NO_COLOR environment variable
    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }

    use std::io::IsTerminal;
    std::io::stderr().is_terminal()
}

/// Calculate Levenshtein distance between two strings
fn levenshtein_distance(s1: &str, s2: &str) -> usize {
    let len2 = s2.chars().count();
    if s1.is_empty() {
        return len2;
    }
    if len2 == 0 {
        return s1.chars().count();
    }

    let mut prev_row: Vec<usize> = (0..=len2).collect();
    let mut curr_row = vec![0; len2 + 1];

    for (i, c1) in s1.chars().enumerate() {
        curr_row[0] = i + 1;

        for (j, c2) in s2.chars().enumerate() {
            let cost = usize::from(c1 != c2);
            curr_row[j + 1] = (curr_row[j] + 1)
                .min(prev_row[j + 1] + 1)
                .min(prev_row[j] + cost);
        }

        std::mem::swap(&mut prev_row, &mut curr_row);
    }

    prev_row[len2]
}

/// Find the closest registered alphabet name, if any is a plausible typo.
pub fn find_closest_alphabet(name: &str, available: &[String]) -> Option<String> {
    // 1-2 edits for short names, up to 3 for longer ones
    let threshold = if name.len() < 5 { 2 } else { 3 };

    available
        .iter()
        .map(|candidate| (levenshtein_distance(name, candidate), candidate))
        .filter(|(distance, _)| *distance <= threshold)
        .min_by_key(|(distance, _)| *distance)
        .map(|(_, candidate)| candidate.clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_color() {
        // Unsafe: environment variable access (not thread-safe)
        unsafe {
            std::env::set_var("NO_COLOR", "1");
        }
    }

    #[test]
    fn test_levenshtein_distance() {
        assert_eq!(levenshtein_distance("base64", "base64"), 0);
        assert_eq!(levenshtein_distance("base64", "base64url"), 3);
        assert_eq!(levenshtein_distance("bas64", "base64"), 1);
        assert_eq!(levenshtein_distance("", "imap"), 4);
    }

    #[test]
    fn test_find_closest_alphabet() {
        let names = vec![
            "base64".to_string(),
            "base64url".to_string(),
            "crypt".to_string(),
            "imap".to_string(),
        ];

        assert_eq!(find_closest_alphabet("bas64", &names), Some("base64".to_string()));
        assert_eq!(find_closest_alphabet("base64ur", &names), Some("base64url".to_string()));
        assert_eq!(find_closest_alphabet("imp", &names), Some("imap".to_string()));
        assert_eq!(find_closest_alphabet("ascii85", &names), None);
    }

    #[test]
    fn test_unknown_alphabet_display() {
        no_color();
        let err = TranscodeError::unknown_alphabet("bas64", Some("base64".to_string()));
        let display = format!("{}", err);
        assert!(display.contains("alphabet 'bas64' not found"));
        assert!(display.contains("did you mean 'base64'?"));
    }

    #[test]
    fn test_terminator_display() {
        no_color();
        let err = TranscodeError::InvalidTerminator(TerminatorProblem::Collides(b'A'));
        assert_eq!(
            format!("{}", err),
            "error: invalid terminator: 'A' is already an alphabet symbol"
        );

        let err = TranscodeError::InvalidTerminator(TerminatorProblem::TooLong(2));
        assert!(format!("{}", err).contains("hint: pass an empty terminator"));
    }

    #[test]
    fn test_io_source_is_preserved() {
        use std::error::Error;
        let err = TranscodeError::from(io::Error::new(io::ErrorKind::BrokenPipe, "gone"));
        let source = err.source().and_then(|e| e.downcast_ref::<io::Error>());
        assert_eq!(source.map(|e| e.kind()), Some(io::ErrorKind::BrokenPipe));
    }
}
