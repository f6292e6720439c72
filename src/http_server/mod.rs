//! # HTTP Server Module
//!
//! Exposes the record store over HTTP.
//!
//! # Endpoints
//!
//! - `/health` - Health check
//! - `/select_all`, `/select_one/:id` - Reads
//! - `/insert`, `/update/:id`, `/delete/:id` - Writes
//! - `/export` - Copy SQLite contents to the JSON file

pub mod config;
pub mod errors;
pub mod observability_routes;
pub mod record_routes;
pub mod server;

pub use config::HttpServerConfig;
pub use errors::{ApiError, ApiResult, ErrorResponse};
pub use record_routes::{DeleteResponse, MessageResponse, RecordState, DELETED_MESSAGE, EXPORTED_MESSAGE};
pub use server::HttpServer;
