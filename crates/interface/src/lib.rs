//! PetCare Interface
//!
//! Entry point shared by every front end:
//! - `cli`: argument parsing and one-shot commands
//! - `report`: plain-text and JSON rendering of command results
//! - `logging`: tracing subscriber setup (stderr or log file)
//!
//! Running without a subcommand opens the terminal UI from `petcare-tui`.

pub mod cli;
mod logging;
mod report;


pub use cli::{CliContext, CliError, OutputFormat, run_cli};
