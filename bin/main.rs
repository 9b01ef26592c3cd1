//! PetCare CLI Entry Point
//!
//! Runs the terminal UI by default, or a one-shot command.

use std::process;

#[tokio::main]
async fn main() {
    if let Err(e) = petcare_interface::run_cli().await {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
