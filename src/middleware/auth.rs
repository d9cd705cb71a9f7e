use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use axum_extra::extract::CookieJar;

use crate::auth;
use crate::error::ApiError;
use crate::state::AppState;

/// Admin session gate: verifies the access-token cookie before letting the
/// request through. Absent cookie and bad token are distinct failures (401
/// vs 403) because the admin UI redirects on the former and re-logs-in on
/// the latter. Verification is stateless; a token stays valid until expiry.
pub async fn require_admin(
    State(state): State<AppState>,
    jar: CookieJar,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = jar
        .get(&state.config.auth.cookie_name)
        .map(|c| c.value().to_string())
        .ok_or(ApiError::Unauthenticated)?;

    auth::verify_token(&token, &state.config.auth.jwt_secret)
        .map_err(|_| ApiError::InvalidToken)?;

    Ok(next.run(request).await)
}
