use crate::cli::{
    args::EncodeArgs,
    config::{create_codec, open_input, open_output},
};
use base64_scan::{AlphabetRegistry, Input, Invocation, StreamingEncoder, WriteSink};
use std::io::{Read, Write};
use tracing::debug;

pub fn handle(args: EncodeArgs, config: &AlphabetRegistry) -> Result<(), Box<dyn std::error::Error>> {
    let codec = create_codec(config, &args.alphabet)?;
    let mut input = open_input(args.file.as_deref())?;
    let mut output = open_output(args.output.as_deref())?;

    // Streaming mode: bounded memory, no trailing newline
    if args.stream {
        let written = StreamingEncoder::new(&codec, &mut output).encode(&mut input)?;
        debug!(written, "streaming encode done");
        return Ok(());
    }

    let mut data = Vec::new();
    input.read_to_end(&mut data)?;

    let mut sink = WriteSink::new(&mut output);
    Invocation::new(&codec)
        .input(Input::Bytes(&data))
        .to_sink(&mut sink)
        .encode()?;
    debug!(input = data.len(), written = sink.written(), "encode done");

    // Terminate the line on stdout; files get the encoded text only
    if args.output.is_none() {
        writeln!(output)?;
    }
    output.flush()?;
    Ok(())
}
