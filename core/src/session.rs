//! The auth flows a front end drives: signup, login, profile, logout.
//!
//! Every flow goes through `RequestClient`, login included: the form body
//! is sent pre-encoded and the token is lifted out of the parsed response.

use std::sync::Arc;

use serde_json::Value;

use crate::client::RequestClient;
use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::http::CallOptions;
use crate::store::TokenStore;
use crate::transport::{Transport, UreqTransport};
use crate::types::{login_form, Profile, SignupRequest, TokenResponse};

pub const SIGNUP_PATH: &str = "/auth/signup";
pub const LOGIN_PATH: &str = "/auth/login";
pub const PROFILE_PATH: &str = "/me";

pub struct AuthSession {
    client: RequestClient,
}

impl AuthSession {
    pub fn new(client: RequestClient) -> Self {
        Self { client }
    }

    /// Session over a real HTTP transport.
    pub fn connect(config: ClientConfig, store: Arc<dyn TokenStore>) -> Self {
        let transport: Arc<dyn Transport> = Arc::new(UreqTransport::new());
        Self::new(RequestClient::new(config, store, transport))
    }

    pub fn client(&self) -> &RequestClient {
        &self.client
    }

    pub fn signup(&self, email: &str, password: &str) -> Result<Value, ApiError> {
        let body = serde_json::to_value(SignupRequest {
            email: email.to_string(),
            password: password.to_string(),
        })
        .map_err(|e| ApiError::Serialization(e.to_string()))?;
        self.client.call(SIGNUP_PATH, CallOptions::post_json(body))
    }

    /// Exchange credentials for a token and store it.
    pub fn login(&self, email: &str, password: &str) -> Result<TokenResponse, ApiError> {
        let options = CallOptions::post_form(login_form(email, password))
            .with_header("content-type", "application/x-www-form-urlencoded");
        let value = self.client.call(LOGIN_PATH, options)?;
        let token: TokenResponse =
            serde_json::from_value(value).map_err(|e| ApiError::Deserialization(e.to_string()))?;
        if token.access_token.is_empty() {
            return Err(ApiError::Deserialization(
                "login response carried an empty access_token".to_string(),
            ));
        }
        self.client.store().set(Some(&token.access_token));
        tracing::debug!("login succeeded, token stored");
        Ok(token)
    }

    pub fn me(&self) -> Result<Profile, ApiError> {
        let value = self.client.call(PROFILE_PATH, CallOptions::get())?;
        serde_json::from_value(value).map_err(|e| ApiError::Deserialization(e.to_string()))
    }

    pub fn logout(&self) {
        self.client.store().set(None);
    }

    pub fn is_logged_in(&self) -> bool {
        self.client.store().get().is_some_and(|t| !t.is_empty())
    }
}
