//! # Client Shell
//!
//! Synchronous client for the record server: prompts for field values,
//! issues one HTTP request per action, renders the JSON result as text.

mod api;
mod errors;
mod payload;
mod shell;

pub use api::{ApiClient, ApiResponse, RecordApi};
pub use errors::{ClientError, ClientResult};
pub use payload::{Expect, Payload};
pub use shell::{Action, Shell};
