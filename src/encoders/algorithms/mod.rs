pub mod decode;
pub mod encode;
pub mod errors;

// Re-export error types for public API
pub use errors::{AlphabetProblem, TerminatorProblem, TranscodeError, find_closest_alphabet};
