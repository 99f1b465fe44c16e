//! Planogram CLI - Local-first store-layout project management

use std::process::ExitCode;

fn main() -> ExitCode {
    if let Err(e) = planogram_cli::cli::run() {
        eprintln!("Error: {:#}", e);
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
