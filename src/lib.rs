//! recordstore - a minimal CRUD record store
//!
//! An HTTP server over a JSON-file or SQLite record store, and a terminal
//! client that talks to it.

pub mod cli;
pub mod client;
pub mod http_server;
pub mod observability;
pub mod store;
