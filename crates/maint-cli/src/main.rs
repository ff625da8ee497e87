//! Maint Checker - vehicle maintenance sheet classification
//!
//! A CLI tool that loads a maintenance sheet CSV, derives delay/status
//! annotations per row, and supports filtering, edits, and Excel export.

mod cli;
mod commands;
mod output;

use clap::Parser;
use cli::Cli;

fn main() {
    let cli = Cli::parse();

    if let Err(e) = commands::execute(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
