use std::{
    collections::HashMap,
    sync::Arc,
    time::{SystemTime, UNIX_EPOCH},
};

use axum::{
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Form, Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tokio::{net::TcpListener, sync::RwLock};
use uuid::Uuid;

/// Public view of an account, returned by signup and `/me`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Profile {
    pub id: Uuid,
    pub email: String,
    pub role: String,
    pub created_at: u64,
}

#[derive(Deserialize)]
pub struct Signup {
    pub email: String,
    pub password: String,
}

#[derive(Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Token {
    pub access_token: String,
    pub token_type: String,
}

struct Account {
    profile: Profile,
    password: String,
}

#[derive(Default)]
pub struct Store {
    accounts: HashMap<String, Account>,
    tokens: HashMap<String, String>,
}

pub type Db = Arc<RwLock<Store>>;

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(Store::default()));
    Router::new()
        .route("/auth/signup", post(signup))
        .route("/auth/login", post(login))
        .route("/me", get(me))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

fn detail(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "detail": message }))).into_response()
}

fn unauthorized(message: &str) -> Response {
    let mut resp = detail(StatusCode::UNAUTHORIZED, message);
    resp.headers_mut()
        .insert(header::WWW_AUTHENTICATE, header::HeaderValue::from_static("Bearer"));
    resp
}

fn now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default()
}

async fn signup(State(db): State<Db>, Json(input): Json<Signup>) -> Response {
    if input.email.trim().is_empty() || input.password.is_empty() {
        return detail(StatusCode::UNPROCESSABLE_ENTITY, "Email and password are required");
    }
    let mut store = db.write().await;
    if store.accounts.contains_key(&input.email) {
        return detail(StatusCode::CONFLICT, "Email already registered");
    }
    let profile = Profile {
        id: Uuid::new_v4(),
        email: input.email.clone(),
        role: "user".to_string(),
        created_at: now(),
    };
    store.accounts.insert(
        input.email,
        Account {
            profile: profile.clone(),
            password: input.password,
        },
    );
    tracing::info!(email = %profile.email, "account created");
    (StatusCode::CREATED, Json(profile)).into_response()
}

async fn login(State(db): State<Db>, Form(input): Form<LoginForm>) -> Response {
    let mut store = db.write().await;
    let valid = store
        .accounts
        .get(&input.username)
        .is_some_and(|account| account.password == input.password);
    if !valid {
        return unauthorized("Incorrect email or password");
    }
    let token = Uuid::new_v4().simple().to_string();
    store.tokens.insert(token.clone(), input.username);
    Json(Token {
        access_token: token,
        token_type: "bearer".to_string(),
    })
    .into_response()
}

async fn me(State(db): State<Db>, headers: HeaderMap) -> Response {
    let Some(token) = bearer(&headers) else {
        return unauthorized("Not authenticated");
    };
    let store = db.read().await;
    let profile = store
        .tokens
        .get(token)
        .and_then(|email| store.accounts.get(email))
        .map(|account| account.profile.clone());
    match profile {
        Some(profile) => Json(profile).into_response(),
        None => unauthorized("Could not validate credentials"),
    }
}

/// Token from an `Authorization: Bearer <token>` header.
fn bearer(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then_some(token)
}
