//! # app-jre CLI
//!
//! This is the binary entry point for the `app-jre` command-line tool.
//!
//! Its primary responsibilities are:
//! - Parsing command-line arguments using `clap`.
//! - Setting up logging and executing the selected command.
//! - Handling top-level errors and translating them into a failing exit code.
//!
//! The pipeline itself lives in the `app_jre` library crate; the binary is a
//! thin wrapper around it.

mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    cli.execute()
}
