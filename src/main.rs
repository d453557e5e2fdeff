//! layered-settings: inspect resolved settings from the command line
//!
//! Thin wrapper around the library: resolves the configured settings
//! sources and prints the merged result.

use anyhow::Result;

mod cli;

fn main() -> Result<()> {
    cli::run()
}
