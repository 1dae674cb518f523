//! studydex - Searchable flashcard index for Markdown study notes

use std::process::ExitCode;

fn main() -> ExitCode {
    if let Err(e) = studydex::cli::run() {
        eprintln!("Error: {:#}", e);
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
