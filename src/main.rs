//! Spriteslice - command-line tool for detecting and slicing sprite sheets

use std::process::ExitCode;

use spriteslice::cli;

fn main() -> ExitCode {
    cli::run()
}
