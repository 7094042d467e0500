//! One-call `encode(input, output)` / `decode(input, output)` front end.
//!
//! An [`Invocation`] pairs a codec with an input (a whole buffer or a
//! reader) and an output (a caller-supplied [`Sink`] or a collected
//! `Vec<u8>`). Exactly one input is required and at most one kind of output
//! may be chosen; collecting is the default.

use crate::core::codec::Codec;
use crate::encoders::algorithms::errors::TranscodeError;
use crate::encoders::sink::Sink;
use std::io::{self, Read};
use tracing::debug;

/// Where the data to transcode comes from.
pub enum Input<'a> {
    /// A complete in-memory buffer
    Bytes(&'a [u8]),
    /// A byte stream, read in bounded chunks
    Stream(Box<dyn Read + 'a>),
}

impl<'a> Input<'a> {
    pub fn stream<R: Read + 'a>(reader: R) -> Self {
        Input::Stream(Box::new(reader))
    }

    fn kind(&self) -> &'static str {
        match self {
            Input::Bytes(_) => "bytes",
            Input::Stream(_) => "stream",
        }
    }
}

impl<'a> From<&'a [u8]> for Input<'a> {
    fn from(bytes: &'a [u8]) -> Self {
        Input::Bytes(bytes)
    }
}

impl<'a> From<&'a str> for Input<'a> {
    fn from(text: &'a str) -> Self {
        Input::Bytes(text.as_bytes())
    }
}

#[derive(Clone, Copy)]
enum Direction {
    Encode,
    Decode,
}

/// Builder for a single encode or decode call.
///
/// # Example
///
/// ```
/// use base64_scan::{Codec, Input, Invocation};
///
/// let codec = Codec::standard();
/// let out = Invocation::new(&codec)
///     .input(Input::Bytes(b"hi"))
///     .encode()
///     .unwrap();
/// assert_eq!(out.as_deref(), Some(&b"aGk="[..]));
/// ```
pub struct Invocation<'a> {
    codec: &'a Codec,
    input: Option<Input<'a>>,
    sink: Option<&'a mut dyn Sink>,
    collect: bool,
}

impl<'a> Invocation<'a> {
    pub fn new(codec: &'a Codec) -> Self {
        Invocation {
            codec,
            input: None,
            sink: None,
            collect: false,
        }
    }

    pub fn input(mut self, input: impl Into<Input<'a>>) -> Self {
        self.input = Some(input.into());
        self
    }

    /// Pushes output chunks into `sink`; the run then returns `None`.
    pub fn to_sink(mut self, sink: &'a mut dyn Sink) -> Self {
        self.sink = Some(sink);
        self
    }

    /// Returns the whole output from the run.
    pub fn collect(mut self) -> Self {
        self.collect = true;
        self
    }

    /// Encodes the input. The output chunks are encoded text.
    pub fn encode(self) -> Result<Option<Vec<u8>>, TranscodeError> {
        self.run(Direction::Encode)
    }

    /// Decodes the input. Garbled content is never an error.
    pub fn decode(self) -> Result<Option<Vec<u8>>, TranscodeError> {
        self.run(Direction::Decode)
    }

    fn run(self, direction: Direction) -> Result<Option<Vec<u8>>, TranscodeError> {
        let Invocation {
            codec,
            input,
            sink,
            collect,
        } = self;

        let input = input.ok_or(TranscodeError::UnsupportedInvocation("no input was given"))?;
        if sink.is_some() && collect {
            return Err(TranscodeError::UnsupportedInvocation(
                "output cannot go to a sink and be collected at the same time",
            ));
        }

        debug!(
            input = input.kind(),
            output = if sink.is_some() { "sink" } else { "collect" },
            "running invocation"
        );

        match sink {
            Some(sink) => {
                transcode(codec, direction, input, sink)?;
                Ok(None)
            }
            None => {
                let mut out = Vec::new();
                transcode(codec, direction, input, &mut out)?;
                Ok(Some(out))
            }
        }
    }
}

fn transcode(
    codec: &Codec,
    direction: Direction,
    input: Input<'_>,
    sink: &mut dyn Sink,
) -> io::Result<()> {
    match (direction, input) {
        (Direction::Encode, Input::Bytes(bytes)) => codec.encode_to(bytes, sink),
        (Direction::Encode, Input::Stream(reader)) => codec.encode_reader(reader, sink),
        (Direction::Decode, Input::Bytes(bytes)) => codec.decode_to(bytes, sink),
        (Direction::Decode, Input::Stream(reader)) => codec.decode_reader(reader, sink),
    }
}
