//! # CLI Module
//!
//! Command-line front end of the `restdoc` binary.
//!
//! ## Commands
//!
//! ### `print`
//!
//! Assemble the bundled bookstore API and print its document:
//!
//! ```bash
//! restdoc print --config restdoc.yaml --format yaml --host api.example.com
//! ```
//!
//! Options:
//! - `--config <FILE>` - YAML or JSON config (optional)
//! - `--format <json|yaml>` - Output format (default: json)
//! - `--host <HOST>` - Host written into the document
//!
//! ### `check`
//!
//! Validate a config file, including CORS settings and global parameters:
//!
//! ```bash
//! restdoc check --config restdoc.yaml
//! ```
//!
//! Logging is configured through the `RESTDOC_LOG_*` variables described in
//! [`crate::logging`].

mod commands;
pub mod demo;


pub use commands::{build_bookstore, run, run_cli, Cli, Commands, OutputFormat};
