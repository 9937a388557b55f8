//! # rugbill-cli Library
//!
//! Argument parsing, logging setup and command dispatch for the `rugbill`
//! binary. `main.rs` only forwards the process arguments here.
//!
//! ## Startup Sequence
//! 1. Parse arguments (`--config` may appear anywhere)
//! 2. Load config: defaults → TOML file → environment
//! 3. Initialize tracing on stderr
//! 4. Run the command against stdout
//! 5. Map the outcome to an exit status (0 ok, 1 findings, 2 error)

pub mod commands;
pub mod config;
pub mod error;

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use chrono::NaiveDate;
use rugbill_core::DocumentType;
use rugbill_store::DocumentFilter;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use crate::commands::Outcome;
use crate::config::{AppConfig, LoggingConfig};
use crate::error::{CliError, CliResult};

pub const USAGE: &str = "\
Usage: rugbill [--config <path>] <command> [args]

Commands:
  preview <file.json>              Itemized lines, findings and totals
  validate <file.json>...          Findings per file; exit 1 if any
  batch <dir> [filters]            Totals for every *.json in a directory
      --type invoice|consignment
      --customer <text>            Case-insensitive name match
      --from <YYYY-MM-DD>          Inclusive
      --to <YYYY-MM-DD>            Inclusive
      --returns                    Only documents with returned items
  config [--save]                  Print (or save) the effective configuration
  help                             Show this message";

// =============================================================================
// Arguments
// =============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Preview { path: PathBuf },
    Validate { paths: Vec<PathBuf> },
    Batch { dir: PathBuf, filter: DocumentFilter },
    Config { save: bool },
    Help,
}

/// A parsed command line.
#[derive(Debug, Clone, PartialEq)]
pub struct Invocation {
    pub config_path: Option<PathBuf>,
    pub command: Command,
}

impl Invocation {
    /// Parses arguments, excluding the program name.
    pub fn parse<I>(args: I) -> CliResult<Self>
    where
        I: IntoIterator<Item = String>,
    {
        let mut config_path = None;
        let mut rest = Vec::new();

        let mut args = args.into_iter();
        while let Some(arg) = args.next() {
            if arg == "--config" {
                config_path = Some(PathBuf::from(value(&mut args, "--config")?));
            } else if arg == "-h" || arg == "--help" {
                rest.insert(0, "help".to_string());
            } else {
                rest.push(arg);
            }
        }

        let mut rest = rest.into_iter();
        let command = match rest.next().as_deref() {
            None | Some("help") => Command::Help,
            Some("preview") => {
                let path = value(&mut rest, "preview")?;
                no_extra(&mut rest)?;
                Command::Preview {
                    path: PathBuf::from(path),
                }
            }
            Some("validate") => {
                let paths: Vec<PathBuf> = rest.by_ref().map(PathBuf::from).collect();
                if paths.is_empty() {
                    return Err(CliError::Usage("validate needs at least one file".into()));
                }
                Command::Validate { paths }
            }
            Some("batch") => parse_batch(&mut rest)?,
            Some("config") => {
                let save = match rest.next().as_deref() {
                    None => false,
                    Some("--save") => true,
                    Some(other) => return Err(unexpected(other)),
                };
                no_extra(&mut rest)?;
                Command::Config { save }
            }
            Some(other) => {
                return Err(CliError::Usage(format!("Unknown command '{}'", other)));
            }
        };

        Ok(Invocation {
            config_path,
            command,
        })
    }
}

fn parse_batch(args: &mut impl Iterator<Item = String>) -> CliResult<Command> {
    let mut dir = None;
    let mut filter = DocumentFilter::new();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--type" => {
                let raw = value(args, "--type")?;
                let document_type = raw.parse::<DocumentType>().map_err(|_| {
                    CliError::Usage(format!(
                        "--type must be invoice or consignment, got '{}'",
                        raw
                    ))
                })?;
                filter = filter.document_type(document_type);
            }
            "--customer" => filter = filter.customer(value(args, "--customer")?),
            "--from" => filter.date_from = Some(date(&value(args, "--from")?)?),
            "--to" => filter.date_to = Some(date(&value(args, "--to")?)?),
            "--returns" => filter = filter.with_returns(true),
            flag if flag.starts_with("--") => return Err(unexpected(flag)),
            _ if dir.is_none() => dir = Some(PathBuf::from(&arg)),
            _ => return Err(unexpected(&arg)),
        }
    }

    let dir = dir.ok_or_else(|| CliError::Usage("batch needs a directory".into()))?;
    Ok(Command::Batch { dir, filter })
}

fn value(args: &mut impl Iterator<Item = String>, flag: &str) -> CliResult<String> {
    args.next()
        .ok_or_else(|| CliError::Usage(format!("{} needs a value", flag)))
}

fn date(raw: &str) -> CliResult<NaiveDate> {
    raw.parse::<NaiveDate>()
        .map_err(|_| CliError::Usage(format!("Expected a YYYY-MM-DD date, got '{}'", raw)))
}

fn no_extra(args: &mut impl Iterator<Item = String>) -> CliResult<()> {
    match args.next() {
        Some(extra) => Err(unexpected(&extra)),
        None => Ok(()),
    }
}

fn unexpected(arg: &str) -> CliError {
    CliError::Usage(format!("Unexpected argument '{}'", arg))
}

// =============================================================================
// Logging
// =============================================================================

/// Installs the stderr subscriber. `RUST_LOG` wins over the config filter.
///
/// A second call (as happens in tests) leaves the first subscriber in place.
pub fn init_tracing(logging: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&logging.filter))
        .unwrap_or_else(|_| EnvFilter::new(LoggingConfig::default().filter));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

// =============================================================================
// Dispatch
// =============================================================================

/// Runs one invocation, writing command output to `out`.
pub fn execute<I>(args: I, out: &mut dyn Write) -> CliResult<Outcome>
where
    I: IntoIterator<Item = String>,
{
    let invocation = Invocation::parse(args)?;

    if invocation.command == Command::Help {
        writeln!(out, "{}", USAGE)?;
        return Ok(Outcome::Success);
    }

    let config = AppConfig::load(invocation.config_path.clone())?;
    init_tracing(&config.logging);
    debug!(command = ?invocation.command, "Dispatching command");

    match invocation.command {
        Command::Preview { path } => commands::document::preview(&path, &config.business, out),
        Command::Validate { paths } => commands::document::validate(&paths, out),
        Command::Batch { dir, filter } => {
            commands::batch::batch(&dir, &filter, &config.numbering, out)
        }
        Command::Config { save: false } => commands::config::show(&config, out),
        Command::Config { save: true } => {
            commands::config::save(&config, invocation.config_path, out)
        }
        Command::Help => Ok(Outcome::Success),
    }
}

/// Entry point for the binary.
pub fn run() -> ExitCode {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match execute(std::env::args().skip(1), &mut out) {
        Ok(outcome) => ExitCode::from(outcome.exit_code()),
        Err(err) => {
            eprintln!("error: {}", err);
            if err.is_usage() {
                eprintln!();
                eprintln!("{}", USAGE);
            }
            ExitCode::from(2)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::fixtures;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn parse(list: &[&str]) -> CliResult<Invocation> {
        Invocation::parse(args(list))
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(parse(&[]).unwrap().command, Command::Help);
        assert_eq!(parse(&["--help"]).unwrap().command, Command::Help);
        assert_eq!(
            parse(&["preview", "a.json"]).unwrap().command,
            Command::Preview {
                path: PathBuf::from("a.json")
            }
        );
        assert_eq!(
            parse(&["validate", "a.json", "b.json"]).unwrap().command,
            Command::Validate {
                paths: vec![PathBuf::from("a.json"), PathBuf::from("b.json")]
            }
        );
        assert_eq!(
            parse(&["config", "--save"]).unwrap().command,
            Command::Config { save: true }
        );
    }

    #[test]
    fn test_config_flag_anywhere() {
        let inv = parse(&["preview", "a.json", "--config", "rb.toml"]).unwrap();
        assert_eq!(inv.config_path, Some(PathBuf::from("rb.toml")));

        let inv = parse(&["--config", "rb.toml", "config"]).unwrap();
        assert_eq!(inv.config_path, Some(PathBuf::from("rb.toml")));
        assert_eq!(inv.command, Command::Config { save: false });
    }

    #[test]
    fn test_parse_batch_filters() {
        let inv = parse(&[
            "batch",
            "docs",
            "--type",
            "consignment",
            "--customer",
            "Brook",
            "--from",
            "2024-01-01",
            "--to",
            "2024-12-31",
            "--returns",
        ])
        .unwrap();

        let expected = DocumentFilter::new()
            .document_type(DocumentType::Consignment)
            .customer("Brook")
            .between(
                NaiveDate::from_ymd_opt(2024, 1, 1),
                NaiveDate::from_ymd_opt(2024, 12, 31),
            )
            .with_returns(true);
        assert_eq!(
            inv.command,
            Command::Batch {
                dir: PathBuf::from("docs"),
                filter: expected
            }
        );
    }

    #[test]
    fn test_usage_errors() {
        let cases: [&[&str]; 10] = [
            &["frobnicate"],
            &["preview"],
            &["preview", "a.json", "b.json"],
            &["validate"],
            &["batch"],
            &["batch", "docs", "--type", "receipt"],
            &["batch", "docs", "--from", "March"],
            &["batch", "docs", "--colour"],
            &["config", "--load"],
            &["--config"],
        ];
        for bad in cases {
            let err = parse(bad).unwrap_err();
            assert!(err.is_usage(), "{:?} should be a usage error", bad);
        }
    }

    #[test]
    fn test_execute_end_to_end() {
        let dir = tempfile::tempdir().unwrap();
        let config = fixtures::write(
            dir.path(),
            "rugbill.toml",
            "[business]\nname = \"Kilim House\"\n",
        );
        let doc = fixtures::write(dir.path(), "inv.json", fixtures::SQFT_INVOICE);
        let config = config.to_string_lossy().into_owned();
        let doc = doc.to_string_lossy().into_owned();

        let mut out = Vec::new();
        let outcome = execute(args(&["--config", &config, "preview", &doc]), &mut out).unwrap();
        assert_eq!(outcome, Outcome::Success);
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("Kilim House\n"));
        assert!(text.contains("$477.00"));

        let mut out = Vec::new();
        let outcome = execute(args(&["--config", &config, "validate", &doc]), &mut out).unwrap();
        assert_eq!(outcome, Outcome::Success);
    }

    #[test]
    fn test_execute_validate_with_findings() {
        let dir = tempfile::tempdir().unwrap();
        let config = dir.path().join("absent.toml").to_string_lossy().into_owned();
        let doc = fixtures::write(dir.path(), "bad.json", fixtures::INCOMPLETE);
        let doc = doc.to_string_lossy().into_owned();

        let mut out = Vec::new();
        let outcome = execute(args(&["--config", &config, "validate", &doc]), &mut out).unwrap();
        assert_eq!(outcome, Outcome::Findings);
        assert_eq!(outcome.exit_code(), 1);
    }

    #[test]
    fn test_execute_help_skips_config() {
        let mut out = Vec::new();
        execute(args(&["help"]), &mut out).unwrap();
        assert!(String::from_utf8(out).unwrap().starts_with("Usage: rugbill"));
    }
}
