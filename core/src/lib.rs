//! Client core for the auth demo API.
//!
//! # Overview
//! Signs up, logs in, fetches the caller's profile and logs out against a
//! remote auth service. All calls go through `RequestClient`, which attaches
//! the stored bearer token, normalizes errors into `ApiError`, and clears
//! the token whenever the server answers 401.
//!
//! # Design
//! - `TokenStore` is injected, so tests use `MemoryTokenStore` and the CLI
//!   uses `FileTokenStore`.
//! - Each call is `build` (pure) → `Transport::execute` (I/O) → `parse`
//!   (pure), so request building and response handling are testable
//!   without a network.
//! - Configuration is an explicit `ClientConfig`; the library never reads
//!   the environment unless `ClientConfig::from_env` is called.

pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod session;
pub mod store;
pub mod transport;
pub mod types;

pub use client::RequestClient;
pub use config::{ClientConfig, DEFAULT_BASE_URL};
pub use error::ApiError;
pub use http::{CallOptions, HttpMethod, HttpRequest, HttpResponse, RequestBody};
pub use session::AuthSession;
pub use store::{FileTokenStore, MemoryTokenStore, TokenStore};
pub use transport::{Transport, UreqTransport};
pub use types::{Profile, SignupRequest, TokenResponse};
