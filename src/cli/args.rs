//! CLI argument definitions using clap
//!
//! Commands:
//! - quotebook serve [--config <path>] [--host <host>] [--port <port>] [--data-file <path>]
//! - quotebook list [--data-file <path>]
//! - quotebook add --text <text> [--author <author>] [--data-file <path>]

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Quotebook - a small file-backed quote service
#[derive(Parser, Debug)]
#[command(name = "quotebook")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start the HTTP server
    Serve {
        /// Path to a JSON configuration file
        #[arg(long)]
        config: Option<PathBuf>,

        /// Host to bind to (overrides the config file)
        #[arg(long)]
        host: Option<String>,

        /// Port to bind to (overrides the config file)
        #[arg(long)]
        port: Option<u16>,

        /// Quote file (overrides the config file)
        #[arg(long)]
        data_file: Option<PathBuf>,
    },

    /// Print all stored quotes as JSON
    List {
        /// Quote file
        #[arg(long, default_value = "quotes.json")]
        data_file: PathBuf,
    },

    /// Add a quote without starting the server
    Add {
        /// Quote text
        #[arg(long)]
        text: String,

        /// Quote author
        #[arg(long, default_value = "")]
        author: String,

        /// Quote file
        #[arg(long, default_value = "quotes.json")]
        data_file: PathBuf,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
