//! Request wrapper for the auth API.
//!
//! # Design
//! `RequestClient` holds the base address, the shared token store and a
//! transport. A call is split the same way as the rest of the crate:
//! `build` turns options into an `HttpRequest` (reading the token once),
//! the transport executes it, and `parse` turns the `HttpResponse` into a
//! JSON value or an `ApiError`. `call` runs all three.

use std::sync::Arc;

use serde_json::{Map, Value};

use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::http::{CallOptions, HttpRequest, HttpResponse, RequestBody};
use crate::store::TokenStore;
use crate::transport::Transport;

pub struct RequestClient {
    config: ClientConfig,
    store: Arc<dyn TokenStore>,
    transport: Arc<dyn Transport>,
}

impl RequestClient {
    pub fn new(
        config: ClientConfig,
        store: Arc<dyn TokenStore>,
        transport: Arc<dyn Transport>,
    ) -> Self {
        Self {
            config,
            store,
            transport,
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn store(&self) -> &Arc<dyn TokenStore> {
        &self.store
    }

    /// Issue one request against `<base><path>` and return the parsed body.
    pub fn call(&self, path: &str, options: CallOptions) -> Result<Value, ApiError> {
        let request = self.build(path, &options)?;
        tracing::debug!(method = %request.method, url = %request.url, "dispatching request");
        let response = self.transport.execute(request)?;
        tracing::debug!(status = response.status, "received response");
        self.parse(response)
    }

    /// Build the outgoing request. The token store is read exactly once.
    pub fn build(&self, path: &str, options: &CallOptions) -> Result<HttpRequest, ApiError> {
        // an empty slot value means logged out
        let token = self.store.get().filter(|t| !t.is_empty());

        let mut headers = Vec::new();
        let body = match &options.body {
            Some(RequestBody::Form(encoded)) => Some(encoded.clone()),
            Some(RequestBody::Json(value)) => {
                headers.push(("content-type".to_string(), "application/json".to_string()));
                let body = serde_json::to_string(value)
                    .map_err(|e| ApiError::Serialization(e.to_string()))?;
                Some(body)
            }
            None => None,
        };
        if let Some(token) = token {
            headers.push(("authorization".to_string(), format!("Bearer {token}")));
        }
        merge_headers(&mut headers, &options.headers);

        Ok(HttpRequest {
            method: options.method,
            url: format!("{}{path}", self.config.base_url()),
            headers,
            body,
        })
    }

    /// Interpret a response. A 401 always clears the stored token, even
    /// though it is also returned as an error.
    pub fn parse(&self, response: HttpResponse) -> Result<Value, ApiError> {
        if response.status == 401 {
            tracing::warn!("server rejected credentials, clearing stored token");
            self.store.set(None);
        }
        if !response.is_success() {
            return Err(ApiError::Http {
                status: response.status,
                message: error_message(&response),
            });
        }
        Ok(serde_json::from_str(&response.body).unwrap_or_else(|_| Value::Object(Map::new())))
    }
}

/// Append caller headers, dropping any default with the same name first.
fn merge_headers(headers: &mut Vec<(String, String)>, extra: &[(String, String)]) {
    for (name, value) in extra {
        headers.retain(|(k, _)| !k.eq_ignore_ascii_case(name));
        headers.push((name.clone(), value.clone()));
    }
}

/// Prefer the server's `detail` string, then the status reason phrase.
fn error_message(response: &HttpResponse) -> String {
    let detail = serde_json::from_str::<Value>(&response.body)
        .ok()
        .and_then(|body| body.get("detail").and_then(Value::as_str).map(str::to_string))
        .filter(|detail| !detail.is_empty());
    if let Some(detail) = detail {
        return detail;
    }
    ::http::StatusCode::from_u16(response.status)
        .ok()
        .and_then(|status| status.canonical_reason())
        .map(str::to_string)
        .unwrap_or_else(|| format!("HTTP {}", response.status))
}
