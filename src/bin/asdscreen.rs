//! asdscreen CLI binary.

use asdscreen::cli::{args::*, commands::*};
use clap::Parser;
use log::LevelFilter;
use std::process;

fn main() {
    // Parse command line arguments using clap
    let args = ScreenArgs::parse();

    // Map verbosity onto the log filter; RUST_LOG still wins when set.
    let level = match args.verbosity() {
        0 => LevelFilter::Error,
        1 => LevelFilter::Warn,
        2 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();

    // Execute the command
    if let Err(e) = execute_command(args) {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}
