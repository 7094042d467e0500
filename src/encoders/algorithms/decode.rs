//! Garbage-tolerant base64 decoding.
//!
//! Symbols are pulled out of the input in order, skipping every byte that is
//! not an alphabet symbol. Each run of four symbols yields three bytes. The
//! final group is resolved in one of two ways:
//!
//! * If the last four *slots* (symbols or terminators, ignoring everything
//!   else) read `S S S T` or `S S T T`, they form a padded tail worth 2 or 1
//!   bytes. Those symbols are taken out of the body and any 1-3 symbols left
//!   dangling in the body before them are dropped.
//! * Otherwise the body leftover decides: 2 symbols give 1 byte, 3 symbols
//!   give 2 bytes, a single symbol is dropped.
//!
//! Nothing here ever reports malformed input.

use crate::core::alphabet::{Alphabet, INVALID};
use crate::core::scan::SymbolClass;
use crate::encoders::sink::Sink;
use std::io;

/// Default number of trailing bytes searched for a padded tail in buffer mode.
pub const DEFAULT_TAIL_LOOKBACK: usize = 100;

/// Maps four 6-bit indices to three bytes.
#[inline]
pub fn decode_quad(q: [u8; 4]) -> [u8; 3] {
    [
        (q[0] << 2) | (q[1] >> 4),
        ((q[1] & 0x0F) << 4) | (q[2] >> 2),
        ((q[2] & 0x03) << 6) | q[3],
    ]
}

/// Maps 2 or 3 leading indices of a final group to 1 or 2 bytes.
/// Absent positions count as zero. Any other count yields nothing.
pub fn decode_partial(indices: &[u8]) -> ([u8; 2], usize) {
    match *indices {
        [i1, i2] => {
            let [b1, _, _] = decode_quad([i1, i2, 0, 0]);
            ([b1, 0], 1)
        }
        [i1, i2, i3] => {
            let [b1, b2, _] = decode_quad([i1, i2, i3, 0]);
            ([b1, b2], 2)
        }
        _ => ([0, 0], 0),
    }
}

/// Number of symbols in a padded tail, if the four slot classes form one.
fn padded_symbols(classes: [SymbolClass; 4]) -> Option<usize> {
    use SymbolClass::{Symbol as S, Terminator as T};
    match classes {
        [S, S, S, T] => Some(3),
        [S, S, T, T] => Some(2),
        _ => None,
    }
}

/// Collects symbol indices into groups of four.
#[derive(Debug, Default, Clone)]
struct QuadAccumulator {
    pending: [u8; 4],
    len: usize,
}

impl QuadAccumulator {
    #[inline]
    fn push<K: Sink + ?Sized>(&mut self, index: u8, sink: &mut K) -> io::Result<()> {
        self.pending[self.len] = index;
        self.len += 1;
        if self.len == 4 {
            self.len = 0;
            sink.accept(&decode_quad(self.pending))?;
        }
        Ok(())
    }

    fn leftover(&self) -> &[u8] {
        &self.pending[..self.len]
    }

    fn clear(&mut self) {
        self.len = 0;
    }
}

/// A padded final group located by [`find_padded_tail`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaddedTail {
    /// Offset of the first tail slot; the body ends here.
    pub start: usize,
    indices: [u8; 3],
    len: usize,
}

impl PaddedTail {
    /// The 2 or 3 symbol indices carried by the tail.
    pub fn indices(&self) -> &[u8] {
        &self.indices[..self.len]
    }
}

/// Looks for a padded final group within the last `lookback` bytes of `input`.
///
/// The search walks backwards collecting the last four slots. If any of them
/// lies before the window, no tail is reported and the caller treats the
/// input as unpadded. The bound keeps tail discovery cheap on large buffers;
/// an input whose tail is surrounded by more than `lookback` bytes of noise
/// can therefore resolve its final group differently than streaming mode.
pub fn find_padded_tail(alphabet: &Alphabet, input: &[u8], lookback: usize) -> Option<PaddedTail> {
    alphabet.terminator()?;
    let scan = alphabet.scan_pattern();
    let window_start = input.len().saturating_sub(lookback);

    let mut positions = [0usize; 4];
    let mut found = 0;
    for pos in (window_start..input.len()).rev() {
        if scan.is_slot(input[pos]) {
            found += 1;
            positions[4 - found] = pos;
            if found == 4 {
                break;
            }
        }
    }
    if found < 4 {
        return None;
    }

    let classes = positions.map(|p| scan.class_of(input[p]));
    let len = padded_symbols(classes)?;
    let mut indices = [0u8; 3];
    for (slot, &pos) in indices.iter_mut().zip(&positions[..len]) {
        *slot = alphabet.decode_symbol(input[pos])?;
    }
    Some(PaddedTail {
        start: positions[0],
        indices,
        len,
    })
}

/// Decodes a complete buffer, pushing 3-byte chunks (and a shorter final
/// chunk) into `sink`.
pub fn decode_buffer<K>(
    alphabet: &Alphabet,
    input: &[u8],
    lookback: usize,
    sink: &mut K,
) -> io::Result<()>
where
    K: Sink + ?Sized,
{
    let tail = find_padded_tail(alphabet, input, lookback);
    let body = match &tail {
        Some(t) => &input[..t.start],
        None => input,
    };

    let table = alphabet.decode_table();
    let mut quad = QuadAccumulator::default();
    for &b in body {
        let index = table[b as usize];
        if index != INVALID {
            quad.push(index, sink)?;
        }
    }

    let (bytes, len) = match &tail {
        Some(t) => decode_partial(t.indices()),
        None => decode_partial(quad.leftover()),
    };
    if len > 0 {
        sink.accept(&bytes[..len])?;
    }
    Ok(())
}

/// Incremental decoder state for streaming input.
///
/// The last four slots are held back until more input proves they are not
/// the final group, so tail discovery is exact no matter how the input is
/// split. Memory use is constant.
#[derive(Debug, Default, Clone)]
pub struct StreamScanner {
    body: QuadAccumulator,
    held: [u8; 4],
    held_len: usize,
}

impl StreamScanner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feeds the next piece of input; complete groups go to `sink`.
    pub fn feed<K>(&mut self, alphabet: &Alphabet, chunk: &[u8], sink: &mut K) -> io::Result<()>
    where
        K: Sink + ?Sized,
    {
        let scan = alphabet.scan_pattern();
        for &b in chunk {
            if !scan.is_slot(b) {
                continue;
            }
            if self.held_len == 4 {
                let oldest = self.held[0];
                self.held.copy_within(1.., 0);
                self.held_len = 3;
                self.commit(alphabet, oldest, sink)?;
            }
            self.held[self.held_len] = b;
            self.held_len += 1;
        }
        Ok(())
    }

    /// Moves a slot into the body. Terminators inside the body are noise.
    fn commit<K>(&mut self, alphabet: &Alphabet, slot: u8, sink: &mut K) -> io::Result<()>
    where
        K: Sink + ?Sized,
    {
        match alphabet.decode_symbol(slot) {
            Some(index) => self.body.push(index, sink),
            None => Ok(()),
        }
    }

    /// Resolves the final group once the input is exhausted.
    ///
    /// The scanner is reset afterwards and can be reused for a new input.
    pub fn finish<K>(&mut self, alphabet: &Alphabet, sink: &mut K) -> io::Result<()>
    where
        K: Sink + ?Sized,
    {
        let scan = alphabet.scan_pattern();
        let held = self.held;
        let held_len = std::mem::take(&mut self.held_len);

        let padded = if held_len == 4 {
            padded_symbols(held.map(|b| scan.class_of(b)))
        } else {
            None
        };

        let (bytes, len) = match padded {
            Some(n) => {
                let mut indices = [0u8; 3];
                for (slot, &b) in indices.iter_mut().zip(&held[..n]) {
                    *slot = alphabet.decode_symbol(b).unwrap_or(0);
                }
                decode_partial(&indices[..n])
            }
            None => {
                for &b in &held[..held_len] {
                    self.commit(alphabet, b, sink)?;
                }
                decode_partial(self.body.leftover())
            }
        };
        self.body.clear();

        if len > 0 {
            sink.accept(&bytes[..len])?;
        }
        Ok(())
    }
}

/// Upper bound on the decoded size of `input_len` bytes of text.
pub fn decoded_len_estimate(input_len: usize) -> usize {
    input_len.div_ceil(4) * 3
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode_all(alphabet: &Alphabet, input: &[u8]) -> Vec<u8> {
        let mut out = Vec::new();
        decode_buffer(alphabet, input, DEFAULT_TAIL_LOOKBACK, &mut out).unwrap();
        out
    }

    fn decode_streamed(alphabet: &Alphabet, input: &[u8], split: usize) -> Vec<u8> {
        let mut out = Vec::new();
        let mut scanner = StreamScanner::new();
        for piece in input.chunks(split.max(1)) {
            scanner.feed(alphabet, piece, &mut out).unwrap();
        }
        scanner.finish(alphabet, &mut out).unwrap();
        out
    }

    #[test]
    fn test_rfc4648_vectors() {
        let alphabet = Alphabet::standard();
        let vectors: &[(&str, &str)] = &[
            ("", ""),
            ("Zg==", "f"),
            ("Zm8=", "fo"),
            ("Zm9v", "foo"),
            ("Zm9vYg==", "foob"),
            ("Zm9vYmE=", "fooba"),
            ("Zm9vYmFy", "foobar"),
        ];
        for (encoded, plain) in vectors {
            assert_eq!(decode_all(&alphabet, encoded.as_bytes()), plain.as_bytes());
        }
    }

    #[test]
    fn test_car_sentence() {
        assert_eq!(
            decode_all(&Alphabet::standard(), b"RHVkZSEgV2hlcmUgaXMgbXkgY2FyPz8/Cg=="),
            b"Dude! Where is my car???\n"
        );
    }

    #[test]
    fn test_noisy_input() {
        let input = b"V 2 h h d C Bp c y(((@!!!!\n\n\r\t\tB0aGlzPwo=           :-)     ?";
        assert_eq!(decode_all(&Alphabet::standard(), input), b"What is this?\n");
        assert_eq!(decode_streamed(&Alphabet::standard(), input, 3), b"What is this?\n");
    }

    #[test]
    fn test_unpadded_tail() {
        let alphabet = Alphabet::standard();
        assert_eq!(decode_all(&alphabet, b"Zm9vYg"), b"foob");
        assert_eq!(decode_all(&alphabet, b"Zm9vYmE"), b"fooba");
    }

    #[test]
    fn test_single_trailing_symbol_dropped() {
        let alphabet = Alphabet::standard();
        assert_eq!(decode_all(&alphabet, b"Zm9vY"), b"foo");
        assert_eq!(decode_streamed(&alphabet, b"Zm9vY", 2), b"foo");
    }

    #[test]
    fn test_excess_terminators_tolerated() {
        let alphabet = Alphabet::standard();
        assert_eq!(decode_all(&alphabet, b"Zg==="), b"f");
        assert_eq!(decode_all(&alphabet, b"Zg="), b"f");
    }

    #[test]
    fn test_find_padded_tail() {
        let alphabet = Alphabet::standard();
        let tail = find_padded_tail(&alphabet, b"Zm9vYg==\n", 100).unwrap();
        assert_eq!(tail.start, 4);
        assert_eq!(tail.indices().len(), 2);

        assert!(find_padded_tail(&alphabet, b"Zm9vYmFy", 100).is_none());
        assert!(find_padded_tail(&alphabet, b"Z=g=", 100).is_none());

        let no_pad = alphabet.with_terminator(b"").unwrap();
        assert!(find_padded_tail(&no_pad, b"Zm9vYg==", 100).is_none());
    }

    #[test]
    fn test_lookback_bound() {
        let alphabet = Alphabet::standard();
        let mut input = b"Zm9vYg==".to_vec();
        input.extend(std::iter::repeat_n(b' ', 200));
        assert!(find_padded_tail(&alphabet, &input, 100).is_none());
        assert!(find_padded_tail(&alphabet, &input, 300).is_some());
        // Well-formed input decodes the same either way.
        assert_eq!(decode_all(&alphabet, &input), b"foob");
    }

    #[test]
    fn test_terminator_mid_stream_is_noise() {
        let alphabet = Alphabet::standard();
        assert_eq!(decode_all(&alphabet, b"Zm9v=YmFy"), b"foobar");
        assert_eq!(decode_streamed(&alphabet, b"Zm9v=YmFy", 1), b"foobar");
    }

    #[test]
    fn test_stream_matches_buffer_for_every_split() {
        let alphabet = Alphabet::standard();
        let inputs: &[&[u8]] = &[
            b"RHVkZSEgV2hlcmUgaXMgbXkgY2FyPz8/Cg==",
            b"  Zm9v\r\nYmE=  ",
            b"QUJDRQ=",
            b"QUJDR==",
            b"QQ===",
            b"=",
            b"",
        ];
        for input in inputs {
            let expected = decode_all(&alphabet, input);
            for split in 1..=input.len().max(1) {
                assert_eq!(decode_streamed(&alphabet, input, split), expected, "{:?}", input);
            }
        }
    }

    #[test]
    fn test_scanner_reusable_after_finish() {
        let alphabet = Alphabet::standard();
        let mut scanner = StreamScanner::new();
        let mut out = Vec::new();
        scanner.feed(&alphabet, b"Zg", &mut out).unwrap();
        scanner.finish(&alphabet, &mut out).unwrap();
        scanner.feed(&alphabet, b"Zm8=", &mut out).unwrap();
        scanner.finish(&alphabet, &mut out).unwrap();
        assert_eq!(out, b"ffo");
    }

    #[test]
    fn test_decode_partial() {
        assert_eq!(decode_partial(&[25, 32]), ([b'f', 0], 1));
        assert_eq!(decode_partial(&[25]).1, 0);
        assert_eq!(decode_partial(&[]).1, 0);
    }

    #[test]
    fn test_decoded_len_estimate() {
        assert_eq!(decoded_len_estimate(0), 0);
        assert_eq!(decoded_len_estimate(4), 3);
        assert_eq!(decoded_len_estimate(6), 6);
    }
}
