use crate::core::codec::Codec;
use crate::encoders::algorithms::decode::StreamScanner;
use crate::encoders::sink::{Sink, WriteSink};
use std::io::{self, BufWriter, Read, Write};
use tracing::trace;

/// Decode-side source adapter: a lazy, finite, non-restartable sequence of
/// decoded chunks.
///
/// Every `next()` does one bounded read of at most `chunk_size` bytes and
/// yields whatever complete groups it finished, which may be nothing when the
/// chunk held only noise. Symbols of a group split across reads are carried
/// over. After end-of-input the final group is yielded (if it produces any
/// bytes) and the iterator is done. An I/O error is yielded once and ends
/// the iteration.
///
/// Dropping the iterator early is always safe; it owns nothing but a read
/// buffer and a few bytes of scanner state.
pub struct DecodedChunks<R: Read> {
    codec: Codec,
    reader: R,
    buffer: Vec<u8>,
    scanner: StreamScanner,
    finished: bool,
}

impl<R: Read> DecodedChunks<R> {
    pub fn new(codec: Codec, reader: R) -> Self {
        let chunk_size = codec.options().chunk_size.max(1);
        DecodedChunks {
            codec,
            reader,
            buffer: vec![0u8; chunk_size],
            scanner: StreamScanner::new(),
            finished: false,
        }
    }

    fn read_chunk(&mut self) -> io::Result<usize> {
        loop {
            match self.reader.read(&mut self.buffer) {
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                other => return other,
            }
        }
    }
}

impl<R: Read> Iterator for DecodedChunks<R> {
    type Item = io::Result<Vec<u8>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        let read = self.read_chunk();
        let alphabet = self.codec.alphabet();
        let mut out = Vec::new();
        let step = match read {
            Ok(0) => {
                self.finished = true;
                self.scanner.finish(alphabet, &mut out)
            }
            Ok(n) => {
                trace!(bytes = n, "decoding chunk");
                self.scanner.feed(alphabet, &self.buffer[..n], &mut out)
            }
            Err(e) => Err(e),
        };

        match step {
            Err(e) => {
                self.finished = true;
                Some(Err(e))
            }
            Ok(()) if self.finished && out.is_empty() => None,
            Ok(()) => Some(Ok(out)),
        }
    }
}

/// Streaming decoder for processing large amounts of encoded data efficiently.
///
/// Drives [`DecodedChunks`] to completion and writes every decoded chunk to
/// `writer`.
pub struct StreamingDecoder<'a, W: Write> {
    codec: &'a Codec,
    writer: W,
}

impl<'a, W: Write> StreamingDecoder<'a, W> {
    /// Creates a new streaming decoder.
    ///
    /// # Arguments
    ///
    /// * `codec` - The alphabet and options the data was encoded with
    /// * `writer` - The destination for decoded output
    pub fn new(codec: &'a Codec, writer: W) -> Self {
        StreamingDecoder { codec, writer }
    }

    /// Decodes everything `reader` yields. Returns the number of bytes
    /// written. Malformed content never fails; reader and writer errors are
    /// returned unchanged.
    pub fn decode<R: Read>(&mut self, reader: &mut R) -> io::Result<u64> {
        let mut sink = WriteSink::new(BufWriter::new(&mut self.writer));
        for chunk in self.codec.decoded_chunks(reader) {
            let chunk = chunk?;
            if !chunk.is_empty() {
                sink.accept(&chunk)?;
            }
        }
        let written = sink.written();
        sink.into_inner().flush()?;
        trace!(written, "streaming decode finished");
        Ok(written)
    }
}
