//! CLI argument definitions using clap
//!
//! Commands:
//! - recordstore init
//! - recordstore serve [--port N] [--backend json|sqlite]
//! - recordstore shell [--url URL]
//! - recordstore client <list|get|insert|update|delete|export> [--url URL]

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::store::StoreBackend;

/// recordstore - a minimal CRUD record store
#[derive(Parser, Debug)]
#[command(name = "recordstore")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(long, global = true, default_value = "./recordstore.json")]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create the backing file or database for the configured backend
    Init {
        /// Override the configured backend
        #[arg(long, value_enum)]
        backend: Option<BackendArg>,
    },

    /// Start the HTTP server
    Serve {
        /// Override the configured port
        #[arg(long)]
        port: Option<u16>,

        /// Override the configured backend
        #[arg(long, value_enum)]
        backend: Option<BackendArg>,
    },

    /// Interactive menu client
    Shell {
        /// Server base URL (default: derived from the configured host and port)
        #[arg(long)]
        url: Option<String>,
    },

    /// Send a single request and print the result
    Client {
        /// Server base URL (default: derived from the configured host and port)
        #[arg(long, global = true)]
        url: Option<String>,

        #[command(subcommand)]
        action: ClientAction,
    },
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum ClientAction {
    /// List all records
    List,
    /// Show one record
    Get { id: i64 },
    /// Create a record
    Insert {
        #[arg(long)]
        name: String,
        #[arg(long)]
        value: String,
    },
    /// Replace the given fields of a record
    Update {
        id: i64,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        value: Option<String>,
    },
    /// Delete a record
    Delete { id: i64 },
    /// Export the SQLite store to JSON
    Export,
}

/// Store backend as a command-line value
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendArg {
    Json,
    Sqlite,
}

impl From<BackendArg> for StoreBackend {
    fn from(arg: BackendArg) -> Self {
        match arg {
            BackendArg::Json => StoreBackend::Json,
            BackendArg::Sqlite => StoreBackend::Sqlite,
        }
    }
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
