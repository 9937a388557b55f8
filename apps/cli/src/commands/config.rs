//! # Config Command
//!
//! Prints the effective configuration (file + environment + defaults) as
//! TOML, or writes it back to the config file with `--save`.

use std::io::Write;
use std::path::PathBuf;

use super::Outcome;
use crate::config::AppConfig;
use crate::error::CliResult;

pub fn show(config: &AppConfig, out: &mut dyn Write) -> CliResult<Outcome> {
    write!(out, "{}", config.to_toml()?)?;
    Ok(Outcome::Success)
}

pub fn save(config: &AppConfig, path: Option<PathBuf>, out: &mut dyn Write) -> CliResult<Outcome> {
    let written = config.save(path)?;
    writeln!(out, "Saved configuration to {}", written.display())?;
    Ok(Outcome::Success)
}
