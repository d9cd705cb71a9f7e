use std::net::SocketAddr;

use axum::{
    extract::{ConnectInfo, State},
    http::{header::SET_COOKIE, HeaderMap},
    response::{AppendHeaders, IntoResponse, Json, Response},
};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{debug, warn};

use crate::auth;
use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub senha: Option<String>,
}

/// POST /login - verify the administrator password and set the token cookies.
///
/// Order matters: the throttle counts every attempt before the password is
/// looked at, so a correct password on the 7th try inside the window is
/// still rejected.
pub async fn login(
    State(state): State<AppState>,
    connect_info: Option<ConnectInfo<SocketAddr>>,
    headers: HeaderMap,
    Json(body): Json<LoginRequest>,
) -> Result<Response, ApiError> {
    let client = client_addr(
        &headers,
        connect_info.map(|ci| ci.0),
        state.config.trust_proxy,
    );
    if !state.limiter.check(&client) {
        warn!(client = %client, "login throttled");
        return Err(ApiError::RateLimited);
    }

    let senha = match body.senha.as_deref() {
        Some(s) if !s.is_empty() => s,
        _ => return Err(ApiError::BadRequest("Senha requerida.".to_string())),
    };

    let hash = state
        .config
        .auth
        .admin_password_hash
        .as_deref()
        .ok_or(ApiError::ConfigurationError)?;

    // A malformed stored hash also counts as a failed match
    let valido = bcrypt::verify(senha, hash).unwrap_or(false);
    if !valido {
        debug!(client = %client, "password mismatch");
        return Err(ApiError::InvalidCredential);
    }

    let access = auth::generate_access_token(&state.config.auth.jwt_secret)?;
    let refresh = auth::generate_refresh_token(&state.config.auth.jwt_refresh_secret)?;

    let production = state.config.is_production();
    let cookies = AppendHeaders([
        (
            SET_COOKIE,
            session_cookie(
                &state.config.auth.cookie_name,
                &access,
                auth::ACCESS_TOKEN_HOURS * 60 * 60,
                production,
            ),
        ),
        (
            SET_COOKIE,
            session_cookie(
                &state.config.auth.refresh_cookie_name(),
                &refresh,
                auth::REFRESH_TOKEN_DAYS * 24 * 60 * 60,
                production,
            ),
        ),
    ]);

    Ok((cookies, Json(json!({ "ok": true }))).into_response())
}

/// POST /logout - clear both cookies. Unconditional and idempotent; the
/// tokens themselves are not revoked and verify until natural expiry.
pub async fn logout(State(state): State<AppState>) -> Response {
    let production = state.config.is_production();
    let cookies = AppendHeaders([
        (
            SET_COOKIE,
            session_cookie(&state.config.auth.cookie_name, "", 0, production),
        ),
        (
            SET_COOKIE,
            session_cookie(&state.config.auth.refresh_cookie_name(), "", 0, production),
        ),
    ]);

    (cookies, Json(json!({ "ok": true }))).into_response()
}

/// GET /auth - session confirmation for the admin UI. The actual check runs
/// in the `require_admin` middleware; reaching this handler means it passed.
pub async fn check() -> Json<Value> {
    Json(json!({ "autenticado": true }))
}

/// Cookie attributes toggle with the deployment environment: production
/// serves the UI and the API from different origins, so the cookies need
/// Secure + SameSite=None there; development stays on Lax without Secure.
fn session_cookie(name: &str, value: &str, max_age_secs: i64, production: bool) -> String {
    let attrs = if production {
        "; Secure; SameSite=None"
    } else {
        "; SameSite=Lax"
    };
    format!("{name}={value}; Path=/; HttpOnly; Max-Age={max_age_secs}{attrs}")
}

/// Throttle key for a request. The peer address is authoritative;
/// X-Forwarded-For is consulted only under `trust_proxy`, and then only its
/// rightmost hop, the one appended by our own proxy. Earlier hops (and the
/// whole header, without a proxy) are client-supplied, and keying on them
/// would let one peer rotate the header for unlimited attempts.
fn client_addr(headers: &HeaderMap, peer: Option<SocketAddr>, trust_proxy: bool) -> String {
    let forwarded = if trust_proxy {
        headers
            .get("x-forwarded-for")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.split(',').next_back())
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
    } else {
        None
    };

    forwarded
        .or_else(|| peer.map(|p| p.ip().to_string()))
        .unwrap_or_else(|| "unknown".to_string())
}
