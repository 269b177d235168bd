//! `linelog` binary.
//!
//! Usage:
//!   linelog [OPTIONS] <message>...     Log one message
//!   some-command | linelog [OPTIONS]   Log each line of stdin

use clap::Parser;
use linelog::cli::{Cli, run};
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();
    run(&cli)
}
