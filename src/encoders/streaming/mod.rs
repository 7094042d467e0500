mod decoder;
mod encoder;

pub use decoder::{DecodedChunks, StreamingDecoder};
pub use encoder::{EncodedChunks, ReaderGroups, StreamingEncoder};
