//! HTTP transport types for the host-does-IO pattern.
//!
//! # Design
//! Requests and responses are plain data. `RequestClient::build` produces an
//! `HttpRequest`, a `Transport` turns it into an `HttpResponse`, and
//! `RequestClient::parse` interprets the response. Only the transport
//! touches the network.

use std::fmt;

use serde_json::Value;

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum HttpMethod {
    #[default]
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl HttpMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Payload handed to `RequestClient::call`.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    /// Structured payload, serialized to JSON by the client.
    Json(Value),

    /// Pre-encoded form payload. Sent as-is; the client adds no
    /// content-type, so the caller supplies one if the server needs it.
    Form(String),
}

/// Per-call options. `Default` is a bare `GET` with no body.
#[derive(Debug, Clone, Default)]
pub struct CallOptions {
    pub method: HttpMethod,
    pub body: Option<RequestBody>,
    pub headers: Vec<(String, String)>,
}

impl CallOptions {
    pub fn get() -> Self {
        Self::default()
    }

    pub fn post_json(body: Value) -> Self {
        Self {
            method: HttpMethod::Post,
            body: Some(RequestBody::Json(body)),
            headers: Vec::new(),
        }
    }

    pub fn post_form(encoded: impl Into<String>) -> Self {
        Self {
            method: HttpMethod::Post,
            body: Some(RequestBody::Form(encoded.into())),
            headers: Vec::new(),
        }
    }

    pub fn with_method(mut self, method: HttpMethod) -> Self {
        self.method = method;
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }
}

/// An HTTP request described as plain data.
///
/// Header names produced by the client are lowercase. The token, if any,
/// was captured when the request was built.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl HttpRequest {
    /// First header value matching `name`, ignoring ASCII case.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// An HTTP response described as plain data.
///
/// Constructed by the transport after executing an `HttpRequest`, then
/// passed to `RequestClient::parse`.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_options_are_a_bare_get() {
        let opts = CallOptions::default();
        assert_eq!(opts.method, HttpMethod::Get);
        assert!(opts.body.is_none());
        assert!(opts.headers.is_empty());
    }

    #[test]
    fn header_lookup_ignores_case() {
        let req = HttpRequest {
            method: HttpMethod::Get,
            url: "http://localhost:8000/me".to_string(),
            headers: vec![("Authorization".to_string(), "Bearer t".to_string())],
            body: None,
        };
        assert_eq!(req.header("authorization"), Some("Bearer t"));
        assert_eq!(req.header("content-type"), None);
    }

    #[test]
    fn success_range_is_2xx() {
        let resp = |status| HttpResponse {
            status,
            headers: Vec::new(),
            body: String::new(),
        };
        assert!(resp(200).is_success());
        assert!(resp(204).is_success());
        assert!(!resp(199).is_success());
        assert!(!resp(300).is_success());
        assert!(!resp(401).is_success());
    }
}
