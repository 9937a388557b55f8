//! # CLI Error Type
//!
//! Unified error type for the command-line front end.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in rugbill                                │
//! │                                                                         │
//! │  run(args)                                                             │
//! │     │                                                                   │
//! │     ├── bad arguments ─────────── CliError::Usage ──────┐              │
//! │     ├── config.toml ───────────── CliError::Config ─────┤              │
//! │     ├── reading a document ────── CliError::Read ───────┤              │
//! │     ├── malformed JSON ────────── CliError::Json ───────┼──► stderr    │
//! │     ├── numbering / repository ── CliError::Store ──────┤    exit 2    │
//! │     └── writing to stdout ─────── CliError::Io ─────────┘              │
//! │                                                                         │
//! │  Validation findings are NOT errors: they are printed and reported    │
//! │  through the exit status (1).                                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use rugbill_store::StoreError;
use thiserror::Error;

/// Errors surfaced by CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// Bad command line; the message is shown above the usage text.
    #[error("{0}")]
    Usage(String),

    /// Config file could not be read, parsed or written, or holds bad values.
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// A document file or directory could not be read.
    #[error("Cannot read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A document file is not a valid invoice document.
    #[error("Malformed document {}: {source}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    Store(#[from] StoreError),

    /// Writing command output failed.
    #[error("Output error: {0}")]
    Io(#[from] std::io::Error),
}

impl CliError {
    pub fn read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        CliError::Read {
            path: path.into(),
            source,
        }
    }

    /// Returns true if the user should be shown the usage text.
    pub fn is_usage(&self) -> bool {
        matches!(self, CliError::Usage(_))
    }
}

impl From<toml::de::Error> for CliError {
    fn from(err: toml::de::Error) -> Self {
        CliError::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for CliError {
    fn from(err: toml::ser::Error) -> Self {
        CliError::Config(err.to_string())
    }
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;
