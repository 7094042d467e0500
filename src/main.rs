use base64_scan::TranscodeError;

mod cli;

fn main() {
    if let Err(e) = cli::run() {
        // TranscodeError renders its own `error:` and `hint:` lines
        if e.is::<TranscodeError>() {
            eprintln!("{}", e);
        } else {
            eprintln!("error: {}", e);
        }
        std::process::exit(1);
    }
}
