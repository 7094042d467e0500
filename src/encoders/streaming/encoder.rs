use crate::core::codec::Codec;
use crate::encoders::algorithms::encode::{GroupSource, Residue};
use crate::encoders::sink::WriteSink;
use std::io::{self, BufReader, BufWriter, Read, Write};
use tracing::trace;

/// Fills `buf` from `reader`, retrying short reads, until full or EOF.
pub(super) fn read_full<R: Read + ?Sized>(reader: &mut R, buf: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}

/// Encode-side source adapter over a byte stream.
///
/// Pulls exactly three bytes per group. Once the stream runs dry the 0-2
/// bytes that did not make a full group are available from [`tail`](GroupSource::tail).
pub struct ReaderGroups<R: Read> {
    reader: BufReader<R>,
    residue: Residue,
    exhausted: bool,
}

impl<R: Read> ReaderGroups<R> {
    pub fn new(reader: R) -> Self {
        ReaderGroups {
            reader: BufReader::new(reader),
            residue: Residue::default(),
            exhausted: false,
        }
    }
}

impl<R: Read> GroupSource for ReaderGroups<R> {
    fn next_group(&mut self) -> io::Result<Option<[u8; 3]>> {
        if self.exhausted {
            return Ok(None);
        }
        let mut group = [0u8; 3];
        let n = read_full(&mut self.reader, &mut group)?;
        if n == 3 {
            return Ok(Some(group));
        }
        self.residue = Residue::from_slice(&group[..n]);
        self.exhausted = true;
        Ok(None)
    }

    fn tail(&mut self) -> io::Result<Residue> {
        Ok(self.residue)
    }
}

/// Pull iterator yielding encoded symbols chunk by chunk.
///
/// Each `next()` reads one chunk (the codec's chunk size rounded down to a
/// whole number of groups, at least one group) and returns its encoding. The
/// chunk that hits end-of-input also carries the padded tail.
pub struct EncodedChunks<R: Read> {
    codec: Codec,
    reader: R,
    buffer: Vec<u8>,
    finished: bool,
}

impl<R: Read> EncodedChunks<R> {
    pub fn new(codec: Codec, reader: R) -> Self {
        let aligned = (codec.options().chunk_size / 3).max(1) * 3;
        EncodedChunks {
            codec,
            reader,
            buffer: vec![0u8; aligned],
            finished: false,
        }
    }
}

impl<R: Read> Iterator for EncodedChunks<R> {
    type Item = io::Result<Vec<u8>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        let n = match read_full(&mut self.reader, &mut self.buffer) {
            Ok(n) => n,
            Err(e) => {
                self.finished = true;
                return Some(Err(e));
            }
        };
        if n < self.buffer.len() {
            self.finished = true;
        }
        if n == 0 {
            return None;
        }

        trace!(bytes = n, "encoding chunk");
        // Full chunks are group-aligned, so only the last one has a tail.
        Some(Ok(self.codec.encode_bytes(&self.buffer[..n])))
    }
}

/// Streaming encoder for processing large amounts of data efficiently.
///
/// Reads the input three bytes at a time through [`ReaderGroups`] and writes
/// the encoded text to `writer`. Memory use does not depend on input size.
pub struct StreamingEncoder<'a, W: Write> {
    codec: &'a Codec,
    writer: W,
}

impl<'a, W: Write> StreamingEncoder<'a, W> {
    /// Creates a new streaming encoder.
    ///
    /// # Arguments
    ///
    /// * `codec` - The alphabet and options to encode with
    /// * `writer` - The destination for encoded output
    pub fn new(codec: &'a Codec, writer: W) -> Self {
        StreamingEncoder { codec, writer }
    }

    /// Encodes everything `reader` yields. Returns the number of symbols
    /// written. Reader and writer errors are returned unchanged.
    pub fn encode<R: Read>(&mut self, reader: &mut R) -> io::Result<u64> {
        let mut sink = WriteSink::new(BufWriter::new(&mut self.writer));
        self.codec.encode_reader(reader, &mut sink)?;
        let written = sink.written();
        sink.into_inner().flush()?;
        trace!(written, "streaming encode finished");
        Ok(written)
    }
}
