use crate::core::alphabet::Alphabet;
use crate::encoders::sink::Sink;
use std::io;
use std::slice::ChunksExact;

/// The 0-2 bytes left over after the last full group.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Residue {
    buf: [u8; 2],
    len: u8,
}

impl Residue {
    /// Builds a residue from at most two bytes.
    ///
    /// # Panics
    ///
    /// In debug builds, if `bytes` holds a full group or more.
    pub fn from_slice(bytes: &[u8]) -> Self {
        debug_assert!(bytes.len() <= 2, "residue of {} bytes", bytes.len());
        let mut residue = Residue::default();
        for &b in bytes.iter().take(2) {
            residue.buf[residue.len as usize] = b;
            residue.len += 1;
        }
        residue
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.buf[..self.len as usize]
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

/// Pull-based provider of 3-byte groups for the encode engine.
pub trait GroupSource {
    /// Returns the next full group, or `None` once fewer than 3 bytes remain.
    fn next_group(&mut self) -> io::Result<Option<[u8; 3]>>;

    /// Returns the leftover bytes. Only meaningful after `next_group`
    /// returned `None`.
    fn tail(&mut self) -> io::Result<Residue>;
}

impl<S: GroupSource + ?Sized> GroupSource for &mut S {
    fn next_group(&mut self) -> io::Result<Option<[u8; 3]>> {
        (**self).next_group()
    }

    fn tail(&mut self) -> io::Result<Residue> {
        (**self).tail()
    }
}

/// Group source over an in-memory buffer.
pub struct SliceGroups<'a> {
    chunks: ChunksExact<'a, u8>,
}

impl<'a> SliceGroups<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        SliceGroups {
            chunks: data.chunks_exact(3),
        }
    }
}

impl GroupSource for SliceGroups<'_> {
    fn next_group(&mut self) -> io::Result<Option<[u8; 3]>> {
        Ok(self.chunks.next().map(|c| [c[0], c[1], c[2]]))
    }

    fn tail(&mut self) -> io::Result<Residue> {
        Ok(Residue::from_slice(self.chunks.remainder()))
    }
}

/// Maps one 3-byte group to four symbols.
#[inline]
pub fn encode_group(alphabet: &Alphabet, group: [u8; 3]) -> [u8; 4] {
    let [b1, b2, b3] = group;
    [
        alphabet.encode_index(b1 >> 2),
        alphabet.encode_index(((b1 & 0x03) << 4) | (b2 >> 4)),
        alphabet.encode_index(((b2 & 0x0F) << 2) | (b3 >> 6)),
        alphabet.encode_index(b3 & 0x3F),
    ]
}

/// Encodes the final 0-2 bytes.
///
/// Missing bytes count as zero. The unused symbol slots are filled with the
/// terminator, or dropped when the alphabet has none. Returns the chunk and
/// how many of its bytes are meaningful (0, 2, 3 or 4).
pub fn encode_tail(alphabet: &Alphabet, tail: Residue) -> ([u8; 4], usize) {
    let (b1, b2, produced) = match *tail.as_slice() {
        [b1] => (b1, 0, 2),
        [b1, b2] => (b1, b2, 3),
        _ => return ([0; 4], 0),
    };

    let full = encode_group(alphabet, [b1, b2, 0]);
    let mut chunk = [0u8; 4];
    chunk[..produced].copy_from_slice(&full[..produced]);
    match alphabet.terminator() {
        Some(t) => {
            chunk[produced..].fill(t);
            (chunk, 4)
        }
        None => (chunk, produced),
    }
}

/// Drives `source` to exhaustion, pushing one chunk per group into `sink`,
/// then the padded tail.
pub fn encode<S, K>(alphabet: &Alphabet, source: &mut S, sink: &mut K) -> io::Result<()>
where
    S: GroupSource + ?Sized,
    K: Sink + ?Sized,
{
    while let Some(group) = source.next_group()? {
        sink.accept(&encode_group(alphabet, group))?;
    }

    let tail = source.tail()?;
    let (chunk, len) = encode_tail(alphabet, tail);
    if len > 0 {
        sink.accept(&chunk[..len])?;
    }
    Ok(())
}

/// Number of symbols produced for `input_len` bytes.
pub fn encoded_len(input_len: usize, padded: bool) -> usize {
    let full = (input_len / 3) * 4;
    match (input_len % 3, padded) {
        (0, _) => full,
        (_, true) => full + 4,
        (rem, false) => full + rem + 1,
    }
}
