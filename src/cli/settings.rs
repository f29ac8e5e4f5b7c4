// ABOUTME: CLI config command - print the effective configuration and optionally persist it

use super::util::print_json;
use super::{ConfigArgs, OutputFormat};
use crate::config::AppConfig;
use anyhow::{Context, Result};

/// Execute the config command
pub fn execute(config: &AppConfig, args: &ConfigArgs, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => print_json(config)?,
        OutputFormat::Text => {
            let text = toml::to_string_pretty(config).context("Failed to serialize config")?;
            print!("{text}");
        }
    }

    if args.save {
        let path = config.save()?;
        println!("Saved configuration to {}", path.display());
    }

    Ok(())
}
