//! CLI command implementations

use std::io;
use std::path::Path;

use serde_json::json;

use crate::client::{ApiClient, ApiResponse, RecordApi, Shell};
use crate::http_server::HttpServer;
use crate::observability::{log_event_with_fields, Event};
use crate::store::{open_store, JsonFileStore, RecordPatch, SqliteStore, StoreBackend};

use super::args::{BackendArg, ClientAction, Command};
use super::config::Config;
use super::errors::{CliError, CliResult};

/// Main CLI entry point
///
/// Parses arguments and dispatches to the appropriate command.
/// This is the only function that main.rs should call.
pub fn run() -> CliResult<()> {
    let cli = super::args::Cli::parse_args();
    run_command(&cli.config, cli.command)
}

/// Run the appropriate command based on CLI args
pub fn run_command(config_path: &Path, cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Init { backend } => init(config_path, backend),
        Command::Serve { port, backend } => serve(config_path, port, backend),
        Command::Shell { url } => shell(config_path, url),
        Command::Client { url, action } => client(config_path, url, action),
    }
}

fn load_config(config_path: &Path, backend: Option<BackendArg>) -> CliResult<Config> {
    let mut config = Config::load(config_path)?;
    if let Some(backend) = backend {
        config.store.backend = backend.into();
    }

    log_event_with_fields(
        Event::ConfigLoaded,
        &[
            ("backend", config.store.backend.as_str()),
            ("config", config_path.display().to_string().as_str()),
        ],
    );

    Ok(config)
}

/// Create the backing resource for the configured backend.
///
/// Refuses to touch an existing file.
pub fn init(config_path: &Path, backend: Option<BackendArg>) -> CliResult<()> {
    let config = load_config(config_path, backend)?;
    let data_path = config.store.data_path();

    if data_path.exists() {
        return Err(CliError::already_initialized(data_path));
    }

    match config.store.backend {
        StoreBackend::Json => JsonFileStore::new(data_path).init()?,
        StoreBackend::Sqlite => {
            SqliteStore::open(data_path, config.store.export_path.clone())?;
        }
    }

    let path = data_path.display().to_string();
    log_event_with_fields(
        Event::StoreInitialized,
        &[("backend", config.store.backend.as_str()), ("path", path.as_str())],
    );

    println!(
        "{}",
        json!({"initialized": true, "backend": config.store.backend, "path": path})
    );

    Ok(())
}

/// Open the configured store and serve HTTP until ctrl-c
pub fn serve(config_path: &Path, port: Option<u16>, backend: Option<BackendArg>) -> CliResult<()> {
    let mut config = load_config(config_path, backend)?;
    if let Some(port) = port {
        config.http.port = port;
    }

    let store = open_store(&config.store)?;
    log_event_with_fields(
        Event::StoreOpened,
        &[
            ("backend", store.backend().as_str()),
            ("path", config.store.data_path().display().to_string().as_str()),
        ],
    );

    let server = HttpServer::new(config.http, store);

    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::boot_failed(format!("Failed to create tokio runtime: {}", e)))?;

    rt.block_on(async {
        server
            .start()
            .await
            .map_err(|e| CliError::boot_failed(format!("HTTP server failed: {}", e)))
    })
}

fn api_client(config_path: &Path, url: Option<String>) -> CliResult<ApiClient> {
    let url = match url {
        Some(url) => url,
        None => Config::load(config_path)?.http.base_url(),
    };
    Ok(ApiClient::new(url)?)
}

/// Interactive menu over stdin/stdout
pub fn shell(config_path: &Path, url: Option<String>) -> CliResult<()> {
    let client = api_client(config_path, url)?;
    println!("Connected to {}", client.base_url());

    let stdin = io::stdin();
    let stdout = io::stdout();
    Shell::new(&client, stdin.lock(), stdout.lock()).run()?;

    Ok(())
}

/// Send one request and print the rendered result
pub fn client(config_path: &Path, url: Option<String>, action: ClientAction) -> CliResult<()> {
    let client = api_client(config_path, url)?;
    let response = send_action(&client, action)?;

    if response.is_success() {
        println!("{}", response.payload);
        Ok(())
    } else {
        Err(CliError::request_failed(
            response.status,
            response.payload.to_string(),
        ))
    }
}

/// Map a one-shot client action onto its request
pub fn send_action<A: RecordApi>(api: &A, action: ClientAction) -> CliResult<ApiResponse> {
    let response = match action {
        ClientAction::List => api.select_all()?,
        ClientAction::Get { id } => api.select_one(id)?,
        ClientAction::Insert { name, value } => api.insert(&name, &value)?,
        ClientAction::Update { id, name, value } => api.update(id, &RecordPatch { name, value })?,
        ClientAction::Delete { id } => api.delete(id)?,
        ClientAction::Export => api.export()?,
    };
    Ok(response)
}
