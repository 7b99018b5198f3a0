//! Forgelink CLI entrypoint.

use std::io::{self, Write};
use std::process::ExitCode;

use forgelink::{
    Document, FileOpenRequest, ForgelinkConfig, OperationMode, ResolveError, ResolveRequest,
    open_from_url, resolve_url,
};
use ortho_config::OrthoConfig;
use tracing_subscriber::EnvFilter;

/// Log filter used when `RUST_LOG` is unset.
const DEFAULT_LOG_FILTER: &str = "warn";

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            // Nothing is left to report to if stderr itself fails.
            let _ignored = writeln!(io::stderr().lock(), "{message}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

async fn run() -> Result<(), String> {
    let config = load_config().map_err(|error| error.to_string())?;

    let output = match config.operation_mode() {
        OperationMode::OpenFromUrl => open(&config).await?,
        OperationMode::ResolveUrl => link(&config).await?,
    };

    writeln!(io::stdout().lock(), "{output}")
        .map_err(|error| format!("failed to write output: {error}"))
}

/// Loads configuration from CLI, environment, and files.
///
/// # Errors
///
/// Returns [`ResolveError::Configuration`] when ortho-config fails to parse
/// arguments or load configuration files.
fn load_config() -> Result<ForgelinkConfig, ResolveError> {
    ForgelinkConfig::load().map_err(|error| ResolveError::Configuration {
        message: error.to_string(),
    })
}

/// Resolves the configured document and renders the chosen URL, or every
/// URL as JSON with `--all`.
async fn link(config: &ForgelinkConfig) -> Result<String, String> {
    let document = Document::from_uri_or_path(config.document_input())
        .classify_directory()
        .await;
    let request = ResolveRequest {
        document,
        selection: config.selection().map_err(|error| error.to_string())?,
        flags: config.flags(),
    };

    let resolved = resolve_url(&request, &config.resolver_config())
        .await
        .map_err(|error| error.to_string())?;

    if config.all {
        serde_json::to_string_pretty(&resolved)
            .map_err(|error| format!("failed to serialise URLs: {error}"))
    } else {
        Ok(resolved.url)
    }
}

async fn open(config: &ForgelinkConfig) -> Result<String, String> {
    let url = config.from_url.as_deref().unwrap_or_default();
    let request = open_from_url(url, &config.workspace_roots())
        .await
        .map_err(|error| error.to_string())?;
    Ok(describe_open_request(&request))
}

/// Renders `<path>` or `<path>:<line>:<column>` with one-based numbers.
fn describe_open_request(request: &FileOpenRequest) -> String {
    let path = std::path::absolute(&request.path).unwrap_or_else(|_| request.path.clone());
    request.selection.map_or_else(
        || path.display().to_string(),
        |selection| {
            format!(
                "{}:{}:{}",
                path.display(),
                selection.start_line_number(),
                selection.start_column_number()
            )
        },
    )
}
