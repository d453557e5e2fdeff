//! Show command implementation

use anyhow::Result;
use clap::{Args, ValueEnum};

use super::utils::{render_value, resolve_settings};

#[derive(Args)]
pub struct ShowArgs {
    /// Comma-separated settings sources (falls back to LAYERED_SETTINGS)
    #[arg(short, long, value_name = "LIST")]
    pub settings: Option<String>,

    /// Output format
    #[arg(short, long, value_name = "FORMAT", default_value = "json")]
    pub format: Format,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    /// Pretty-printed JSON object
    Json,
    /// One KEY=value line per setting
    Env,
}

pub fn run(args: ShowArgs) -> Result<()> {
    let settings = resolve_settings(args.settings.as_deref())?;

    match args.format {
        Format::Json => {
            println!("{}", serde_json::to_string_pretty(&settings.as_dict())?);
        }
        Format::Env => {
            for (key, value) in settings.as_dict() {
                println!("{}={}", key, render_value(&value));
            }
        }
    }

    Ok(())
}
