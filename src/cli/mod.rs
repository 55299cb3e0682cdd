//! CLI module for Quotebook
//!
//! Provides command-line interface for:
//! - serve: Run the HTTP API
//! - list: Dump stored quotes
//! - add: Append a quote offline

mod args;
mod commands;
mod errors;
mod io;

pub use args::{Cli, Command};
pub use commands::{add, apply_overrides, list, load_config, run, run_command, serve};
pub use errors::{CliError, CliErrorCode, CliResult};
