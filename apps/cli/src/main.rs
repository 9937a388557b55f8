//! # rugbill Entry Point
//!
//! ```text
//! rugbill preview invoice.json
//! rugbill validate drafts/*.json
//! rugbill batch archive/ --type consignment --customer hadley
//! rugbill --config shop.toml config
//! ```
//!
//! Everything lives in the library so it can be tested without a process.

use std::process::ExitCode;

fn main() -> ExitCode {
    rugbill_cli::run()
}
