use crate::cli::{
    args::DecodeArgs,
    config::{create_codec, open_input, open_output},
    global::GlobalArgs,
};
use base64_scan::{AlphabetRegistry, Input, Invocation, StreamingDecoder, WriteSink};
use std::io::{Read, Write};
use tracing::debug;

pub fn handle(
    args: DecodeArgs,
    global: &GlobalArgs,
    config: &AlphabetRegistry,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut codec = create_codec(config, &args.alphabet)?;
    if let Some(lookback) = args.lookback {
        codec = codec.with_tail_lookback(lookback);
    }
    let mut input = open_input(args.file.as_deref())?;
    let mut output = open_output(args.output.as_deref())?;

    let (read, written) = if args.stream {
        let mut counted = CountingReader::new(&mut input);
        let written = StreamingDecoder::new(&codec, &mut output).decode(&mut counted)?;
        (counted.count, written)
    } else {
        let mut data = Vec::new();
        input.read_to_end(&mut data)?;

        let mut sink = WriteSink::new(&mut output);
        Invocation::new(&codec)
            .input(Input::Bytes(&data))
            .to_sink(&mut sink)
            .decode()?;
        (data.len() as u64, sink.written())
    };
    output.flush()?;
    debug!(read, written, stream = args.stream, "decode done");

    // Garbled input is never an error, but an empty result deserves a notice
    if read > 0 && written == 0 && !global.quiet {
        eprintln!("Warning: no decodable symbols found in {} bytes of input", read);
    }

    Ok(())
}

/// Tracks how many bytes the streaming decoder pulled.
struct CountingReader<R> {
    inner: R,
    count: u64,
}

impl<R: Read> CountingReader<R> {
    fn new(inner: R) -> Self {
        CountingReader { inner, count: 0 }
    }
}

impl<R: Read> Read for CountingReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        let n = self.inner.read(buf)?;
        self.count += n as u64;
        Ok(n)
    }
}
