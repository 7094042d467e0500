use crate::cli::args::ConfigAction;
use base64_scan::AlphabetRegistry;

pub fn handle(action: ConfigAction, config: &AlphabetRegistry) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        ConfigAction::Show { alphabet, json } => handle_show(&alphabet, json, config),
    }
}

fn handle_show(
    name: &str,
    json: bool,
    config: &AlphabetRegistry,
) -> Result<(), Box<dyn std::error::Error>> {
    let codec = config.select(name, None)?;
    let alphabet = codec.alphabet();
    let (resolved, aliases) = match config.get_alphabet(name) {
        Some((resolved, entry)) => (resolved.to_string(), entry.aliases.clone()),
        None => ("(custom)".to_string(), Vec::new()),
    };
    let options = codec.options();

    if json {
        let output = serde_json::json!({
            "name": resolved,
            "symbols": alphabet.symbols_str(),
            "terminator": alphabet.terminator_str(),
            "aliases": aliases,
            "symbol_class": alphabet.scan_pattern().symbol_class(),
            "scan_class": alphabet.scan_pattern().slot_class(),
            "tail_lookback": options.tail_lookback,
            "chunk_size": options.chunk_size,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!("Alphabet: {}", resolved);
    println!("  Symbols: {}", alphabet.symbols_str());
    match alphabet.terminator() {
        Some(_) => println!("  Terminator: {}", alphabet.terminator_str()),
        None => println!("  Terminator: none (unpadded)"),
    }
    if !aliases.is_empty() {
        println!("  Aliases: {}", aliases.join(", "));
    }
    println!("  Symbol class: {}", alphabet.scan_pattern().symbol_class());
    println!("  Scan class: {}", alphabet.scan_pattern().slot_class());
    println!("  Tail lookback: {} bytes", options.tail_lookback);
    println!("  Chunk size: {} bytes", options.chunk_size);

    Ok(())
}
