//! Observable events
//!
//! Events are explicit and typed; the string form is what appears in the
//! `event` field of a log line.

use std::fmt;

use super::logger::Severity;

/// Observable events in the record server
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Lifecycle
    ConfigLoaded,
    StoreOpened,
    StoreInitialized,
    ServerStarted,

    // Requests
    HttpRequest,

    // Store operations
    RecordCreated,
    RecordUpdated,
    RecordDeleted,
    StoreExported,
    StoreError,
}

impl Event {
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::ConfigLoaded => "CONFIG_LOADED",
            Event::StoreOpened => "STORE_OPENED",
            Event::StoreInitialized => "STORE_INITIALIZED",
            Event::ServerStarted => "SERVER_STARTED",
            Event::HttpRequest => "HTTP_REQUEST",
            Event::RecordCreated => "RECORD_CREATED",
            Event::RecordUpdated => "RECORD_UPDATED",
            Event::RecordDeleted => "RECORD_DELETED",
            Event::StoreExported => "STORE_EXPORTED",
            Event::StoreError => "STORE_ERROR",
        }
    }

    /// Default severity for this event
    pub fn severity(&self) -> Severity {
        match self {
            Event::StoreError => Severity::Error,
            _ => Severity::Info,
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
