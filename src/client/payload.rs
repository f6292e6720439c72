//! Response payloads and their text rendering
//!
//! Each endpoint's body is decoded into the variant it is expected to carry,
//! then rendered with a fixed template.

use std::fmt;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::http_server::{DeleteResponse, ErrorResponse, MessageResponse};
use crate::store::Record;

/// Decoded response body
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    Records(Vec<Record>),
    Record(Record),
    Deleted { message: String, deleted: Record },
    Message(String),
    Error(String),
    /// Anything that did not match the expected shape
    Scalar(Value),
}

/// Body shape an endpoint returns on success
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expect {
    Records,
    Record,
    Deleted,
    Message,
}

impl Payload {
    /// Decode a response body.
    ///
    /// Error statuses decode `{"error": ...}`; success statuses decode the
    /// shape `expect` names. Bodies matching neither fall back to `Scalar`.
    pub fn decode(success: bool, body: &[u8], expect: Expect) -> Self {
        let decoded = if success {
            match expect {
                Expect::Records => parse::<Vec<Record>>(body).map(Payload::Records),
                Expect::Record => parse::<Record>(body).map(Payload::Record),
                Expect::Deleted => parse::<DeleteResponse>(body).map(|r| Payload::Deleted {
                    message: r.message,
                    deleted: r.deleted_object,
                }),
                Expect::Message => parse::<MessageResponse>(body).map(|r| Payload::Message(r.message)),
            }
        } else {
            parse::<ErrorResponse>(body).map(|r| Payload::Error(r.error))
        };

        decoded.unwrap_or_else(|| match serde_json::from_slice::<Value>(body) {
            Ok(value) => Payload::Scalar(value),
            Err(_) => Payload::Scalar(Value::String(String::from_utf8_lossy(body).into_owned())),
        })
    }
}

fn parse<T: DeserializeOwned>(body: &[u8]) -> Option<T> {
    serde_json::from_slice(body).ok()
}

fn write_record(f: &mut fmt::Formatter<'_>, record: &Record) -> fmt::Result {
    write!(
        f,
        "ID: {}\nName: {}\nValue: {}",
        record.id, record.name, record.value
    )
}

impl fmt::Display for Payload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Payload::Records(records) => {
                for (i, record) in records.iter().enumerate() {
                    if i > 0 {
                        f.write_str("\n\n")?;
                    }
                    write_record(f, record)?;
                }
                Ok(())
            }
            Payload::Record(record) => write_record(f, record),
            Payload::Deleted { message, deleted } => {
                write!(f, "{}\n\nDeleted record:\n", message)?;
                write_record(f, deleted)
            }
            Payload::Message(message) => f.write_str(message),
            Payload::Error(error) => write!(f, "Error: {}", error),
            Payload::Scalar(Value::String(s)) => f.write_str(s),
            Payload::Scalar(value) => write!(f, "{}", value),
        }
    }
}
