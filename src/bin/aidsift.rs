//! aidsift CLI binary.

use aidsift::cli::{args::AidsiftArgs, commands::execute_command};
use clap::Parser;
use std::process;

fn main() {
    // Parse command line arguments using clap; wrong or missing arguments
    // print usage and exit non-zero without processing anything.
    let args = AidsiftArgs::parse();

    if let Err(e) = execute_command(args) {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}
