//! Get command implementation

use anyhow::Result;
use clap::Args;

use super::utils::{render_value, resolve_settings};

#[derive(Args)]
pub struct GetArgs {
    /// Setting name to print
    #[arg(value_name = "KEY")]
    pub key: String,

    /// Comma-separated settings sources (falls back to LAYERED_SETTINGS)
    #[arg(short, long, value_name = "LIST")]
    pub settings: Option<String>,
}

pub fn run(args: GetArgs) -> Result<()> {
    let settings = resolve_settings(args.settings.as_deref())?;
    let value = settings.get(&args.key)?;
    println!("{}", render_value(value));
    Ok(())
}
