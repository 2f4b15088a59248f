//! deps-flatten CLI entry point
//!
//! Parses arguments, runs the flattening and turns any failure into a
//! colored diagnostic on stderr with a non-zero exit code.

use anyhow::Result;
use clap::Parser;
use deps_flatten::cli;
use deps_flatten::core::user_friendly_error;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();

    // Set up colored output for Windows
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    match cli.execute() {
        Ok(()) => Ok(()),
        Err(e) => {
            let error_ctx = user_friendly_error(e);
            error_ctx.display();
            std::process::exit(1);
        }
    }
}
