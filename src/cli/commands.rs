//! CLI command implementations

use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::http_server::{HttpServer, HttpServerConfig};
use crate::observability::init_logging;
use crate::quotes::{NewQuote, QuoteStore};

use super::args::Command;
use super::errors::{CliError, CliResult};
use super::io::write_json;

/// Parse arguments and run the selected command
pub fn run() -> CliResult<()> {
    let cli = super::args::Cli::parse_args();
    init_logging().map_err(|e| CliError::io_error(format!("Failed to init logging: {}", e)))?;
    run_command(cli.command)
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Serve {
            config,
            host,
            port,
            data_file,
        } => {
            let config = load_config(config.as_deref())?;
            serve(apply_overrides(config, host, port, data_file))
        }
        Command::List { data_file } => list(&data_file),
        Command::Add {
            text,
            author,
            data_file,
        } => add(&data_file, text, author),
    }
}

/// Load the server configuration file, or defaults when none is given
pub fn load_config(path: Option<&Path>) -> CliResult<HttpServerConfig> {
    let Some(path) = path else {
        return Ok(HttpServerConfig::default());
    };

    let content = fs::read_to_string(path)
        .map_err(|e| CliError::config_error(format!("Failed to read config: {}", e)))?;

    serde_json::from_str(&content)
        .map_err(|e| CliError::config_error(format!("Invalid config JSON: {}", e)))
}

/// Command-line flags take precedence over the config file
pub fn apply_overrides(
    mut config: HttpServerConfig,
    host: Option<String>,
    port: Option<u16>,
    data_file: Option<PathBuf>,
) -> HttpServerConfig {
    if let Some(host) = host {
        config.host = host;
    }
    if let Some(port) = port {
        config.port = port;
    }
    if let Some(data_file) = data_file {
        config.data_file = data_file;
    }
    config
}

/// Open the store and serve HTTP until shutdown
pub fn serve(config: HttpServerConfig) -> CliResult<()> {
    let server = HttpServer::open(config)?;

    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::serve_failed(format!("Failed to create tokio runtime: {}", e)))?;

    rt.block_on(async {
        server
            .start()
            .await
            .map_err(|e| CliError::serve_failed(format!("HTTP server failed: {}", e)))
    })
}

/// Print every stored quote
pub fn list(data_file: &Path) -> CliResult<()> {
    let store = QuoteStore::open(data_file)?;
    write_json(&store.list())
}

/// Append one quote to the file and print it
pub fn add(data_file: &Path, text: String, author: String) -> CliResult<()> {
    let store = QuoteStore::open(data_file)?;
    let quote = store.create(NewQuote::new(text, author))?;
    info!(id = quote.id, path = %data_file.display(), "Quote stored");
    write_json(&quote)
}
