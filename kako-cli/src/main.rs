// kako-cli/src/main.rs
//
// Entry point for the `kako` binary: parse arguments, run one interactive
// session, and map any fatal error to exit status 1.

use clap::Parser;
use kako_cli::{Cli, run_interactive, terminal};
use std::process;

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run_interactive(&cli) {
        log::error!("Run failed: {}", e);
        eprintln!("{}", terminal::error(&format!("Error: {e}")));
        process::exit(1);
    }
}
