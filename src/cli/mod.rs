//! CLI module
//!
//! Provides command-line interface for:
//! - init: Create the backing file or database
//! - serve: Start the HTTP server
//! - shell: Interactive menu client
//! - client: One-shot requests

mod args;
mod commands;
mod config;
mod errors;

pub use args::{BackendArg, Cli, ClientAction, Command};
pub use commands::{client, init, run, run_command, send_action, serve, shell};
pub use config::Config;
pub use errors::{CliError, CliErrorCode, CliResult};
