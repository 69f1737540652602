//! HTTP Basic authentication against a credential store.

use std::collections::HashMap;
use std::sync::Arc;

use axum::Json;
use axum::extract::FromRequestParts;
use axum::http::header::{AUTHORIZATION, WWW_AUTHENTICATE};
use axum::http::request::Parts;
use axum::http::{HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::state::AppState;

/// A configured account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    pub username: String,
    pub password: String,
    pub role: String,
}

impl UserRecord {
    pub fn new(
        username: impl Into<String>,
        password: impl Into<String>,
        role: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            role: role.into(),
        }
    }
}

/// Built-in demo accounts.
pub fn default_users() -> Vec<UserRecord> {
    [
        ("Arjun", "devpass123", "engineering"),
        ("Meera", "marketwise", "marketing"),
        ("Kiran", "finsecure", "finance"),
        ("Ravi", "codeflow", "engineering"),
        ("Lina", "brandpass", "marketing"),
        ("Anita", "peoplecare", "hr"),
        ("Rajesh", "visionlead", "c-levelexecutives"),
        ("Nina", "genaccess", "employee"),
    ]
    .into_iter()
    .map(|(username, password, role)| UserRecord::new(username, password, role))
    .collect()
}

/// An identity established by authentication.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthenticatedUser {
    pub username: String,
    pub role: String,
}

/// Checks username/password pairs.
pub trait CredentialStore: Send + Sync {
    /// The user's identity if the password matches.
    fn authenticate(&self, username: &str, password: &str) -> Option<AuthenticatedUser>;
}

/// Read-only in-memory account table.
#[derive(Debug, Clone, Default)]
pub struct StaticCredentialStore {
    users: HashMap<String, UserRecord>,
}

impl StaticCredentialStore {
    pub fn new(users: impl IntoIterator<Item = UserRecord>) -> Self {
        Self {
            users: users
                .into_iter()
                .map(|user| (user.username.clone(), user))
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

impl CredentialStore for StaticCredentialStore {
    fn authenticate(&self, username: &str, password: &str) -> Option<AuthenticatedUser> {
        self.users
            .get(username)
            .filter(|user| user.password == password)
            .map(|user| AuthenticatedUser {
                username: user.username.clone(),
                role: user.role.clone(),
            })
    }
}

/// Authentication failure. Renders as 401 with a Basic challenge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthError;

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let body = Json(serde_json::json!({ "detail": "Invalid credentials" }));
        let mut response = (StatusCode::UNAUTHORIZED, body).into_response();
        response
            .headers_mut()
            .insert(WWW_AUTHENTICATE, HeaderValue::from_static("Basic"));
        response
    }
}

impl FromRequestParts<Arc<AppState>> for AuthenticatedUser {
    type Rejection = AuthError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or(AuthError)?;

        let (username, password) = parse_basic(header).ok_or(AuthError)?;

        state
            .credentials()
            .authenticate(&username, &password)
            .ok_or_else(|| {
                warn!("Rejected credentials for {username:?}");
                AuthError
            })
    }
}

/// Decode an `Authorization: Basic ...` header value.
pub fn parse_basic(header: &str) -> Option<(String, String)> {
    let (scheme, encoded) = header.trim().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("basic") {
        return None;
    }
    let decoded = STANDARD.decode(encoded.trim()).ok()?;
    let decoded = String::from_utf8(decoded).ok()?;
    let (username, password) = decoded.split_once(':')?;
    Some((username.to_string(), password.to_string()))
}
