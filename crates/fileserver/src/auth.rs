//! HTTP Basic authentication gate
//!
//! Every request passes through [`auth_gate`] before anything touches the
//! filesystem or the access log. Each request produces exactly one audit
//! line, whether it is rejected or forwarded.

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{header, HeaderMap, HeaderValue, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use base64::{engine::general_purpose::STANDARD, Engine as _};

use crate::credentials::CredentialStore;
use crate::identity::RequestContext;
use crate::logging::AUDIT_TARGET;

/// Challenge sent with every 401 response
pub const BASIC_CHALLENGE: &str = r#"Basic realm="File Server Login""#;

/// Body of every 401 response
const UNAUTHORIZED_BODY: &str = "Authentication failed, please enter a valid username and password\n";

/// Username/password pair taken from an `Authorization: Basic` header
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BasicCredentials {
    pub username: String,
    pub password: String,
}

impl BasicCredentials {
    /// Read credentials from the request headers
    ///
    /// Returns `None` when the header is missing, uses another scheme, is not
    /// valid base64 or UTF-8, or has no `:` between user and password.
    pub fn from_headers(headers: &HeaderMap) -> Option<Self> {
        let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
        Self::parse(value)
    }

    fn parse(value: &str) -> Option<Self> {
        let (scheme, payload) = value.split_once(' ')?;
        if !scheme.eq_ignore_ascii_case("Basic") {
            return None;
        }

        let decoded = STANDARD.decode(payload).ok()?;
        let decoded = String::from_utf8(decoded).ok()?;
        let (username, password) = decoded.split_once(':')?;

        Some(Self {
            username: username.to_string(),
            password: password.to_string(),
        })
    }
}

/// Authentication middleware
///
/// Rejects with 401 and a Basic challenge when credentials are missing or
/// wrong, otherwise forwards the request unmodified to `next`.
pub async fn auth_gate(
    State(store): State<Arc<CredentialStore>>,
    request: Request,
    next: Next,
) -> Response {
    let context = RequestContext::from_request(&request);

    let Some(credentials) = &context.credentials else {
        tracing::warn!(
            target: AUDIT_TARGET,
            "[{}] auth failed - no credentials (path: {})",
            context.client,
            context.path
        );
        return unauthorized();
    };

    if !store.verify(&credentials.username, &credentials.password) {
        tracing::warn!(
            target: AUDIT_TARGET,
            "[{}] auth failed - bad credentials (user: {}, path: {})",
            context.client,
            credentials.username,
            context.path
        );
        return unauthorized();
    }

    tracing::info!(
        target: AUDIT_TARGET,
        "[{}] auth succeeded - user: {} (path: {})",
        context.client,
        credentials.username,
        context.path
    );
    next.run(request).await
}

fn unauthorized() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        [(
            header::WWW_AUTHENTICATE,
            HeaderValue::from_static(BASIC_CHALLENGE),
        )],
        UNAUTHORIZED_BODY,
    )
        .into_response()
}
