//! Blocking HTTP client for the record server
//!
//! One call = one request. No retries; a transport failure is returned to
//! the caller as [`ClientError::Transport`].

use reqwest::blocking::{Client, RequestBuilder};
use serde_json::json;

use super::errors::ClientResult;
use super::payload::{Expect, Payload};
use crate::store::RecordPatch;

/// A decoded server response
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub payload: Payload,
}

impl ApiResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// The record server's operations as seen by a client
pub trait RecordApi {
    fn select_all(&self) -> ClientResult<ApiResponse>;
    fn select_one(&self, id: i64) -> ClientResult<ApiResponse>;
    fn insert(&self, name: &str, value: &str) -> ClientResult<ApiResponse>;
    fn update(&self, id: i64, patch: &RecordPatch) -> ClientResult<ApiResponse>;
    fn delete(&self, id: i64) -> ClientResult<ApiResponse>;
    fn export(&self) -> ClientResult<ApiResponse>;
}

/// HTTP implementation of [`RecordApi`]
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> ClientResult<Self> {
        let http = Client::builder().build()?;
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn send(&self, request: RequestBuilder, expect: Expect) -> ClientResult<ApiResponse> {
        let response = request.send()?;
        let status = response.status();
        let body = response.bytes()?;

        Ok(ApiResponse {
            status: status.as_u16(),
            payload: Payload::decode(status.is_success(), &body, expect),
        })
    }
}

impl RecordApi for ApiClient {
    fn select_all(&self) -> ClientResult<ApiResponse> {
        self.send(self.http.get(self.url("/select_all")), Expect::Records)
    }

    fn select_one(&self, id: i64) -> ClientResult<ApiResponse> {
        self.send(
            self.http.get(self.url(&format!("/select_one/{}", id))),
            Expect::Record,
        )
    }

    fn insert(&self, name: &str, value: &str) -> ClientResult<ApiResponse> {
        let body = json!({"name": name, "value": value});
        self.send(self.http.post(self.url("/insert")).json(&body), Expect::Record)
    }

    fn update(&self, id: i64, patch: &RecordPatch) -> ClientResult<ApiResponse> {
        self.send(
            self.http
                .put(self.url(&format!("/update/{}", id)))
                .json(patch),
            Expect::Record,
        )
    }

    fn delete(&self, id: i64) -> ClientResult<ApiResponse> {
        self.send(
            self.http.delete(self.url(&format!("/delete/{}", id))),
            Expect::Deleted,
        )
    }

    fn export(&self) -> ClientResult<ApiResponse> {
        self.send(self.http.post(self.url("/export")), Expect::Message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::ClientError;

    /// Address of a port that was bound and released, so nothing listens on it
    fn closed_url() -> String {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        format!("http://{}", addr)
    }

    #[test]
    fn test_base_url_trailing_slash() {
        let client = ApiClient::new("http://127.0.0.1:5000/").unwrap();
        assert_eq!(client.base_url(), "http://127.0.0.1:5000");
        assert_eq!(client.url("/select_all"), "http://127.0.0.1:5000/select_all");
    }

    #[test]
    fn test_unreachable_server_is_transport_error() {
        let client = ApiClient::new(closed_url()).unwrap();
        let result = client.select_all();
        assert!(matches!(result, Err(ClientError::Transport(_))));
    }
}
