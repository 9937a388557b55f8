//! # CLI Commands
//!
//! One module per command family. Every command writes its report to the
//! `out` writer it is handed (stdout in the binary, a buffer in tests) and
//! leaves logging to `tracing` on stderr.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── document.rs  → preview, validate (single files)
//! ├── batch.rs     → batch (directory → repository → filtered listing)
//! └── config.rs    → config (print / save effective configuration)
//! ```

pub mod batch;
pub mod config;
pub mod document;

use std::path::Path;

use rugbill_core::InvoiceDocument;
use tracing::debug;

use crate::error::{CliError, CliResult};

/// How a command finished, mapped to the process exit status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success,

    /// At least one document has validation findings.
    Findings,
}

impl Outcome {
    pub fn exit_code(self) -> u8 {
        match self {
            Outcome::Success => 0,
            Outcome::Findings => 1,
        }
    }
}

/// Reads and parses one JSON document.
///
/// The top level must be a JSON object. Every document field has a default,
/// so an array would otherwise load as a blank document.
pub fn load_document(path: &Path) -> CliResult<InvoiceDocument> {
    let text = std::fs::read_to_string(path).map_err(|e| CliError::read(path, e))?;
    let malformed = |source| CliError::Json {
        path: path.to_path_buf(),
        source,
    };
    let object: serde_json::Map<String, serde_json::Value> =
        serde_json::from_str(&text).map_err(malformed)?;
    let document: InvoiceDocument =
        serde_json::from_value(serde_json::Value::Object(object)).map_err(malformed)?;

    debug!(
        path = %path.display(),
        invoice_number = %document.invoice_number,
        items = document.items.len(),
        "Loaded document"
    );
    Ok(document)
}
