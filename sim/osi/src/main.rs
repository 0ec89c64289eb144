use osi::cli::parse_args;
use std::process::ExitCode;

/// Without arguments, main walks "Hello!" from the first lab device to the
/// second
fn main() -> ExitCode {
    println!("OSI simulator v{}", env!("CARGO_PKG_VERSION"));
    match parse_args() {
        Ok(()) => {
            println!("Done");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}
