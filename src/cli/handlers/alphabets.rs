use crate::cli::args::AlphabetsArgs;
use base64_scan::AlphabetRegistry;

pub fn handle(args: AlphabetsArgs, config: &AlphabetRegistry) -> Result<(), Box<dyn std::error::Error>> {
    let names = config.names();

    if args.json {
        let entries: Vec<serde_json::Value> = names
            .iter()
            .filter_map(|name| config.get_alphabet(name))
            .map(|(name, alphabet)| {
                serde_json::json!({
                    "name": name,
                    "chars": alphabet.chars,
                    "padding": alphabet.padding.clone().unwrap_or_default(),
                    "aliases": alphabet.aliases,
                    "default": name == config.settings.default_alphabet(),
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    println!("Available alphabets:\n");
    for name in &names {
        let Some((_, alphabet)) = config.get_alphabet(name) else {
            continue;
        };
        let padding = match alphabet.padding.as_deref() {
            Some(p) if !p.is_empty() => p,
            _ => "-",
        };
        let marker = if name == config.settings.default_alphabet() { "*" } else { " " };
        let preview: String = alphabet.chars.chars().take(20).collect();
        let suffix = if alphabet.chars.len() > 20 { "..." } else { "" };
        println!("{} {:<12} pad {:<2} {}{}", marker, name, padding, preview, suffix);
        if !alphabet.aliases.is_empty() {
            println!("  {:<12} aliases: {}", "", alphabet.aliases.join(", "));
        }
    }
    Ok(())
}
