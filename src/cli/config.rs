//! Configuration file
//!
//! `recordstore.json`, every field optional:
//!
//! ```json
//! {
//!   "backend": "sqlite",
//!   "json_path": "data.json",
//!   "sqlite_path": "database.db",
//!   "export_path": "data.json",
//!   "host": "127.0.0.1",
//!   "port": 5000,
//!   "cors_origins": []
//! }
//! ```

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::errors::{CliError, CliResult};
use crate::http_server::HttpServerConfig;
use crate::store::StoreConfig;

/// Configuration file structure
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(flatten)]
    pub store: StoreConfig,

    #[serde(flatten)]
    pub http: HttpServerConfig,
}

impl Config {
    /// Load configuration from file. A missing file means all defaults.
    pub fn load(path: &Path) -> CliResult<Self> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => {
                return Err(CliError::config_error(format!(
                    "Failed to read config: {}",
                    e
                )))
            }
        };

        let config: Config = serde_json::from_str(&content)
            .map_err(|e| CliError::config_error(format!("Invalid config JSON: {}", e)))?;

        config.validate()?;

        Ok(config)
    }

    fn validate(&self) -> CliResult<()> {
        if self.http.port == 0 {
            return Err(CliError::config_error("port must be > 0"));
        }

        let paths = [
            ("json_path", &self.store.json_path),
            ("sqlite_path", &self.store.sqlite_path),
            ("export_path", &self.store.export_path),
        ];
        for (field, path) in paths {
            if path.as_os_str().is_empty() {
                return Err(CliError::config_error(format!("{} must not be empty", field)));
            }
        }

        Ok(())
    }
}
