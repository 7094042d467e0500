use std::io::{self, Write};

/// Push-based consumer of engine output.
///
/// The encode engine hands over one 4-symbol chunk per byte group (shorter
/// only for an unpadded final group); the decode engine hands over 3-byte
/// chunks (1 or 2 bytes for the final group). Errors returned here abort the
/// operation and reach the caller unchanged.
pub trait Sink {
    fn accept(&mut self, chunk: &[u8]) -> io::Result<()>;
}

impl Sink for Vec<u8> {
    fn accept(&mut self, chunk: &[u8]) -> io::Result<()> {
        self.extend_from_slice(chunk);
        Ok(())
    }
}

impl<S: Sink + ?Sized> Sink for &mut S {
    fn accept(&mut self, chunk: &[u8]) -> io::Result<()> {
        (**self).accept(chunk)
    }
}

/// Forwards every chunk to a [`Write`] implementation.
///
/// Chunks are small, so wrap unbuffered writers (files, stdout) in a
/// `BufWriter` first.
pub struct WriteSink<W: Write> {
    writer: W,
    written: u64,
}

impl<W: Write> WriteSink<W> {
    pub fn new(writer: W) -> Self {
        WriteSink { writer, written: 0 }
    }

    /// Total bytes accepted so far.
    pub fn written(&self) -> u64 {
        self.written
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> Sink for WriteSink<W> {
    fn accept(&mut self, chunk: &[u8]) -> io::Result<()> {
        self.writer.write_all(chunk)?;
        self.written += chunk.len() as u64;
        Ok(())
    }
}

/// Adapts a closure into a sink, e.g. to collect chunks selectively.
pub struct FnSink<F>(pub F);

impl<F> Sink for FnSink<F>
where
    F: FnMut(&[u8]) -> io::Result<()>,
{
    fn accept(&mut self, chunk: &[u8]) -> io::Result<()> {
        (self.0)(chunk)
    }
}

/// Collects encoded symbols straight into a `String`.
///
/// Used only with ASCII alphabets, so every byte maps to one `char`.
#[derive(Debug, Default)]
pub(crate) struct TextSink(pub String);

impl Sink for TextSink {
    fn accept(&mut self, chunk: &[u8]) -> io::Result<()> {
        self.0.extend(chunk.iter().map(|&b| char::from(b)));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vec_sink() {
        let mut sink: Vec<u8> = Vec::new();
        sink.accept(b"abc").unwrap();
        sink.accept(b"d").unwrap();
        assert_eq!(sink, b"abcd");
    }

    #[test]
    fn test_write_sink_counts() {
        let mut sink = WriteSink::new(Vec::new());
        sink.accept(b"QUJD").unwrap();
        sink.accept(b"RA==").unwrap();
        assert_eq!(sink.written(), 8);
        assert_eq!(sink.into_inner(), b"QUJDRA==");
    }

    #[test]
    fn test_fn_sink_collects_chunk_boundaries() {
        let mut chunks: Vec<Vec<u8>> = Vec::new();
        let mut sink = FnSink(|chunk: &[u8]| -> io::Result<()> {
            chunks.push(chunk.to_vec());
            Ok(())
        });
        sink.accept(b"ab").unwrap();
        sink.accept(b"cd").unwrap();
        drop(sink);
        assert_eq!(chunks, vec![b"ab".to_vec(), b"cd".to_vec()]);
    }

    #[test]
    fn test_fn_sink_propagates_error() {
        let mut sink = FnSink(|_: &[u8]| -> io::Result<()> { Err(io::Error::other("full")) });
        let err = sink.accept(b"x").unwrap_err();
        assert_eq!(err.to_string(), "full");
    }
}
