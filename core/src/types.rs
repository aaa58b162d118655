//! DTOs for the auth API.
//!
//! These mirror the mock-server's schema but are defined independently;
//! the integration tests catch drift between the two crates.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

/// JSON body of `POST /auth/signup`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignupRequest {
    pub email: String,
    pub password: String,
}

/// Successful `POST /auth/login` response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default = "default_token_type")]
    pub token_type: String,
}

fn default_token_type() -> String {
    "bearer".to_string()
}

/// The caller's own profile as returned by `GET /me`.
///
/// Only the identity fields are typed. Everything else the server sends
/// (timestamps in whatever format, `api_token`, ...) is kept in `extra` and
/// written back out unchanged on serialization.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Profile {
    pub id: Uuid,
    pub email: String,
    #[serde(default)]
    pub role: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// URL-encode login credentials as `username=..&password=..`.
pub fn login_form(email: &str, password: &str) -> String {
    format!(
        "username={}&password={}",
        urlencoding::encode(email),
        urlencoding::encode(password)
    )
}
